//! Animated flame card showing the current streak.

use badges_common::Result;
use tracing::debug;

use crate::{renderer::BadgeRenderer, svg::SvgDocument};

/// Colors shared by the dark cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    /// Card and page background
    pub background: String,
    /// Label and bar color
    pub accent: String,
    /// Light end of the number gradient
    pub gold_light: String,
    /// Dark end of the number gradient
    pub gold_dark: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            background: "#0f2527".to_string(),
            accent: "#f6a936".to_string(),
            gold_light: "#ffd86b".to_string(),
            gold_dark: "#f39a2e".to_string(),
        }
    }
}

/// 1200×480 streak card
#[derive(Debug, Clone, Default)]
pub struct StreakCard {
    style: CardStyle,
}

impl StreakCard {
    /// Card width in pixels
    pub const WIDTH: u32 = 1200;
    /// Card height in pixels
    pub const HEIGHT: u32 = 480;

    /// Create a card with the given colors
    pub fn new(style: CardStyle) -> Self {
        Self { style }
    }

    /// Build the SVG text for `streak`
    pub fn to_svg(&self, streak: u32) -> String {
        let (w, h) = (Self::WIDTH as f64, Self::HEIGHT as f64);
        let s = &self.style;
        let mut doc = SvgDocument::new(Self::WIDTH, Self::HEIGHT).aria_label(format!("{streak} day streak"));

        doc.add_style(format!(
            r#".bg {{ fill: {bg}; }}
.num {{ font-family: 'Segoe UI', Roboto, Arial, sans-serif; font-weight: 900; font-size: 220px; text-anchor: middle; fill: url(#numGrad); filter: drop-shadow(0 14px 0 rgba(0,0,0,0.35)); }}
.label {{ font-family: 'Segoe UI', Roboto, Arial, sans-serif; font-size: 40px; text-anchor: middle; fill: {accent}; font-weight: 700; letter-spacing: 0.6px; }}
.flame {{ transform-origin: 360px 140px; animation: float 2.6s ease-in-out infinite; }}
.particle {{ opacity: 0.85; animation: rise 2.2s linear infinite; }}
.glow {{ filter: drop-shadow(0 0 14px rgba(255,180,71,0.6)); animation: glow 1.6s ease-in-out infinite alternate; }}
.flicker {{ animation: flicker 0.18s steps(2) infinite; }}
@keyframes float {{ 0% {{ transform: translateY(0); }} 50% {{ transform: translateY(-10px); }} 100% {{ transform: translateY(0); }} }}
@keyframes rise {{ 0% {{ transform: translateY(0) scale(0.9); opacity: 0.9; }} 100% {{ transform: translateY(-36px) scale(1); opacity: 0; }} }}
@keyframes glow {{ from {{ filter: drop-shadow(0 0 8px rgba(255,140,0,0.35)); }} to {{ filter: drop-shadow(0 0 22px rgba(255,90,0,0.55)); }} }}
@keyframes flicker {{ 0% {{ fill: {light}; }} 40% {{ fill: #ffd56a; }} 60% {{ fill: #ffb94a; }} 100% {{ fill: {dark}; }} }}
@media (max-width: 900px) {{ .num {{ font-size: 120px; }} .label {{ font-size: 22px; }} }}"#,
            bg = s.background,
            accent = s.accent,
            light = s.gold_light,
            dark = s.gold_dark,
        ));
        doc.add_def(format!(
            r#"<linearGradient id="numGrad" x1="0" x2="0" y1="0" y2="1"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
            s.gold_light, s.gold_dark
        ));

        doc.raw(r#"<rect width="100%" height="100%" class="bg"/>"#);
        doc.open_group(r#"transform="translate(80,36)""#);
        doc.rect(0.0, 0.0, w - 160.0, h - 72.0, &format!(r#"rx="18" fill="{}""#, s.background));

        doc.open_group(r#"class="flame" transform="translate(120,18)""#);
        doc.ellipse(140.0, 220.0, 120.0, 26.0, r#"fill="rgba(0,0,0,0.36)""#);
        doc.open_group(r#"transform="translate(110,26)""#);
        for (cx, r, fill, delay) in [(10.0, 6.0, "#ffb347", "0s"), (36.0, 4.0, "#ffd86b", "0.4s"), (58.0, 5.0, "#ffcf6a", "0.8s")] {
            doc.circle(cx, 0.0, r, &format!(r#"class="particle" fill="{fill}" style="animation-delay:{delay}""#));
        }
        doc.close_group();
        doc.open_group(r#"class="glow""#);
        doc.path(
            "M220 60 C190 0 120 -10 90 40 C60 95 70 160 120 160 C170 160 240 120 220 60 Z",
            &format!(r#"class="flicker" fill="{}""#, s.gold_light),
        );
        doc.path(
            "M190 98 C174 82 150 90 142 110 C138 120 152 132 170 126 C182 122 192 114 190 98 Z",
            r##"fill="#fff3d8""##,
        );
        doc.close_group();
        doc.close_group();

        let cx = (w - 160.0) / 2.0 + 20.0;
        doc.text(cx, 240.0, r#"class="num""#, &streak.to_string());
        doc.text(cx, 320.0, r#"class="label""#, "day streak");
        doc.close_group();

        debug!(streak, "Rendered streak card");
        doc.build()
    }
}

impl BadgeRenderer for StreakCard {
    type Input = u32;

    fn render(&self, streak: &u32) -> Result<Vec<u8>> {
        Ok(self.to_svg(*streak).into_bytes())
    }

    fn name(&self) -> &'static str {
        "streak-card"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_dimensions_and_label() {
        let svg = StreakCard::default().to_svg(42);
        assert!(svg.contains(r#"width="1200" height="480" viewBox="0 0 1200 480""#));
        assert!(svg.contains(r#"aria-label="42 day streak""#));
        assert!(svg.contains(r#"<text x="540" y="240" class="num">42</text>"#));
        assert!(svg.contains(">day streak</text>"));
    }

    #[test]
    fn test_zero_streak_still_renders() {
        let svg = StreakCard::default().to_svg(0);
        assert!(svg.contains(r#"aria-label="0 day streak""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_custom_background() {
        let card = StreakCard::new(CardStyle {
            background: "#101010".to_string(),
            ..CardStyle::default()
        });
        let svg = card.to_svg(1);
        assert!(svg.contains(".bg { fill: #101010; }"));
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/streak.svg");
        StreakCard::default().render_to_file(&7, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("7 day streak"));
    }
}
