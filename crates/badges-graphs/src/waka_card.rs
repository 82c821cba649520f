//! WakaTime SVG cards: the wide stats card and the small hours card.

use badges_common::{escape_xml, Result};
use tracing::debug;

use crate::{
    renderer::BadgeRenderer,
    streak_card::CardStyle,
    svg::SvgDocument,
    waka::{profile_url, WakaSummary},
};

/// 1000×260 card with total hours and the top languages
#[derive(Debug, Clone, Default)]
pub struct WakaStatsCard {
    style: CardStyle,
}

impl WakaStatsCard {
    /// Card width in pixels
    pub const WIDTH: u32 = 1000;
    /// Card height in pixels
    pub const HEIGHT: u32 = 260;
    /// Languages shown at most
    pub const MAX_LANGUAGES: usize = 6;
    /// Width of a 100% bar
    pub const MAX_BAR: f64 = 420.0;

    const LEFT_PAD: f64 = 40.0;
    const TOP_PAD: f64 = 30.0;

    /// Create a card with the given colors
    pub fn new(style: CardStyle) -> Self {
        Self { style }
    }

    /// Bar width for a whole-number percentage, clamped to 0..=100
    pub fn bar_width(pct: f64) -> f64 {
        (pct.clamp(0.0, 100.0) / 100.0 * Self::MAX_BAR).round()
    }

    /// Build the SVG text
    pub fn to_svg(&self, summary: &WakaSummary) -> String {
        let s = &self.style;
        let link = summary.username.as_deref().and_then(profile_url);
        let mut doc = SvgDocument::new(Self::WIDTH, Self::HEIGHT)
            .with_xlink()
            .aria_label(format!("WakaTime all-time {} hours", summary.hours));
        doc.add_style(format!(
            r#".bg{{fill:{bg}}}
.title{{font-family: 'Segoe UI', Roboto, Arial; font-size:20px; fill:{light}; font-weight:700}}
.hours{{font-family: Georgia, 'Times New Roman', serif; font-size:60px; fill:#ffffff; font-weight:700}}
.lang{{font-family: 'Segoe UI', Roboto, Arial; font-size:15px; fill:#ffffff}}
.pct{{font-family: 'Segoe UI', Roboto, Arial; font-size:15px; fill:{light}; font-weight:700}}
.footer{{font-family: 'Segoe UI', Roboto, Arial; font-size:12px; fill:#9fb3b3}}"#,
            bg = s.background,
            light = s.gold_light,
        ));

        if let Some(href) = &link {
            doc.raw(format!(
                r#"<a xlink:href="{}" target="_blank">"#,
                escape_xml(href)
            ));
        }
        doc.raw(format!(
            r#"<rect width="100%" height="100%" fill="{}" rx="12"/>"#,
            s.background
        ));
        doc.open_group(&format!(
            r#"transform="translate({},{})""#,
            Self::LEFT_PAD,
            Self::TOP_PAD
        ));
        doc.text(0.0, 26.0, r#"class="title""#, "WakaTime (All time)");
        doc.text(0.0, 86.0, r#"class="hours""#, &format!("{} hrs", summary.hours));

        for (i, lang) in summary.languages.iter().take(Self::MAX_LANGUAGES).enumerate() {
            let y = 130.0 + i as f64 * 26.0;
            let pct = lang.percent.round();
            doc.text(Self::LEFT_PAD + 8.0, y, r#"class="lang""#, &lang.name);
            doc.rect(
                Self::LEFT_PAD + 120.0,
                y - 14.0,
                Self::bar_width(pct),
                12.0,
                &format!(r#"rx="6" fill="{}""#, s.accent),
            );
            doc.text(Self::LEFT_PAD + 560.0, y, r#"class="pct""#, &format!("{pct}%"));
        }

        if link.is_some() {
            doc.text(
                0.0,
                f64::from(Self::HEIGHT) - 18.0,
                r#"class="footer""#,
                "Click to view full WakaTime profile",
            );
        }
        doc.close_group();
        if link.is_some() {
            doc.raw("</a>");
        }

        debug!(hours = %summary.hours, languages = summary.languages.len(), "Rendered WakaTime stats card");
        doc.build()
    }
}

impl BadgeRenderer for WakaStatsCard {
    type Input = WakaSummary;

    fn render(&self, summary: &WakaSummary) -> Result<Vec<u8>> {
        Ok(self.to_svg(summary).into_bytes())
    }

    fn name(&self) -> &'static str {
        "wakatime-stats-card"
    }
}

/// 420×300 light card with only the total hours
#[derive(Debug, Clone, Default)]
pub struct WakaHoursCard {
    style: CardStyle,
}

impl WakaHoursCard {
    /// Card width in pixels
    pub const WIDTH: u32 = 420;
    /// Card height in pixels
    pub const HEIGHT: u32 = 300;

    /// Create a card with the given number gradient colors
    pub fn new(style: CardStyle) -> Self {
        Self { style }
    }

    /// Build the SVG text
    pub fn to_svg(&self, summary: &WakaSummary) -> String {
        let s = &self.style;
        let w = f64::from(Self::WIDTH);
        let mut doc = SvgDocument::new(Self::WIDTH, Self::HEIGHT)
            .with_xlink()
            .aria_label(format!("WakaTime all time {} hours", summary.hours));

        doc.add_def(r##"<filter id="cardShadow" x="-70%" y="-70%" width="240%" height="240%"><feDropShadow dx="6" dy="20" stdDeviation="18" flood-color="#000" flood-opacity="0.28"/></filter>"##);
        doc.add_def(r##"<linearGradient id="cardGrad" x1="0" x2="1"><stop offset="0%" stop-color="#fff8d7"/><stop offset="100%" stop-color="#fff3bf"/></linearGradient>"##);
        doc.add_def(format!(
            r#"<linearGradient id="numGrad" x1="0" x2="0" y1="0" y2="1"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
            s.gold_light, s.gold_dark
        ));
        doc.add_style(
            r#".card-font { font-family: "Comic Sans MS", "Segoe UI", Roboto, Arial, sans-serif; -webkit-font-smoothing:antialiased; }
.title { fill:#6b5a1f; font-weight:700; font-size:18px; text-anchor:middle; }
.big { fill:url(#numGrad); font-weight:900; font-size:84px; text-anchor:middle; filter: drop-shadow(0 6px 0 rgba(0,0,0,0.12)); }
.sub { fill:#6b6b6b; font-size:16px; text-anchor:middle; }
.egg-shadow { fill: rgba(0,0,0,0.10); }
.flame-anim { animation: floaty 2400ms ease-in-out infinite; transform-box: fill-box; transform-origin: center; }
.flame-flicker { animation: flicker 1400ms linear infinite; transform-box: fill-box; transform-origin: center; }
@keyframes floaty { 0% { transform: translateY(0) rotate(0deg); } 50% { transform: translateY(-6px) rotate(-1deg); } 100% { transform: translateY(0) rotate(0deg); } }
@keyframes flicker { 0% { transform: scale(1); opacity:1 } 50% { transform: scale(0.996); opacity:0.96 } 100% { transform: scale(1); opacity:1 } }"#,
        );

        doc.open_group(r#"filter="url(#cardShadow)""#);
        doc.path(
            "M24 20 h300 a28 28 0 0 1 28 28 v128 a28 28 0 0 1 -28 28 h-146 q-12 8 -24 8 t-24 -8 h-180 z",
            r##"fill="url(#cardGrad)" stroke="#f0e0a0" stroke-width="1.2""##,
        );
        doc.path(
            "M332 68 q-6 18 -22 26",
            r##"stroke="#f5e0a0" stroke-width="1.2" fill="none" opacity="0.66""##,
        );
        doc.ellipse(308.0, 46.0, 6.0, 3.0, r##"fill="#fff9d8" opacity="0.78""##);
        doc.close_group();

        doc.open_group(r#"transform="translate(64,46)""#);
        doc.ellipse(36.0, 86.0, 62.0, 14.0, r#"class="egg-shadow" opacity="0.10""#);
        doc.open_group(r#"class="flame-anim" transform="translate(0,-6)""#);
        doc.open_group(r#"class="flame-flicker" transform="translate(0,0) scale(0.98)""#);
        doc.path(
            "M86 18 C66 -6 42 -6 28 18 C16 36 20 86 56 92 C92 98 106 58 86 18 Z",
            &format!(r#"fill="{}""#, s.gold_light),
        );
        doc.path(
            "M74 50 C66 38 52 38 44 50 C40 58 48 70 62 66 C72 64 82 58 74 50 Z",
            r##"fill="#fff3d8" opacity="0.96""##,
        );
        doc.path(
            "M68 12 C62 6 50 8 46 14 C44 20 50 26 58 24 C64 22 70 16 68 12 Z",
            r##"fill="#ffe08a" opacity="0.98""##,
        );
        doc.close_group();
        doc.close_group();
        doc.close_group();

        doc.open_group(&format!(r#"transform="translate({}, 32) scale(0.68)""#, Self::WIDTH - 92));
        doc.open_group(r#"class="flame-anim" style="animation-delay:120ms;""#);
        doc.path(
            "M40 4 C33 -4 18 -6 12 4 C6 12 8 34 26 36 C44 38 56 22 40 4 Z",
            &format!(r#"fill="{}" opacity="0.98""#, s.gold_light),
        );
        doc.path(
            "M36 18 C32 12 24 12 20 18 C18 22 22 26 28 24 C32 22 34 20 36 18 Z",
            r##"fill="#fff3d8" opacity="0.9""##,
        );
        doc.close_group();
        doc.close_group();

        doc.open_group(r#"class="card-font""#);
        doc.text(w / 2.0, 56.0, r#"class="title""#, "WakaTime (All Time)");
        doc.text(w / 2.0, 140.0, r#"class="big""#, &summary.hours);
        doc.text(w / 2.0, 176.0, r#"class="sub""#, "hrs coding");
        doc.open_group(&format!(r#"transform="translate({}, 238)""#, Self::WIDTH / 2 - 20));
        doc.path("M0 14 q20 18 40 0", r##"fill="#f7eed1" stroke="none" opacity="0.96""##);
        doc.path(
            "M0 14 q20 18 40 0",
            r##"fill="#e9dcc3" opacity="0.08" transform="translate(0,6)""##,
        );
        doc.close_group();
        if let Some(href) = summary.username.as_deref().and_then(profile_url) {
            doc.raw(format!(
                r#"<a xlink:href="{}" target="_blank" rel="noopener"><rect width="{}" height="{}" fill="transparent"/></a>"#,
                escape_xml(&href),
                Self::WIDTH,
                Self::HEIGHT
            ));
        }
        doc.close_group();

        debug!(hours = %summary.hours, "Rendered WakaTime hours card");
        doc.build()
    }
}

impl BadgeRenderer for WakaHoursCard {
    type Input = WakaSummary;

    fn render(&self, summary: &WakaSummary) -> Result<Vec<u8>> {
        Ok(self.to_svg(summary).into_bytes())
    }

    fn name(&self) -> &'static str {
        "wakatime-hours-card"
    }
}
