//! Raster WakaTime card drawn with the plotters bitmap backend.

use badges_common::{BadgeError, Result};
use image::{ImageOutputFormat, RgbImage};
use plotters::{coord::Shift, prelude::*};
use std::io::Cursor;
use tracing::{debug, warn};

use crate::{
    renderer::{parse_color, BadgeRenderer},
    streak_card::CardStyle,
    waka::WakaSummary,
};

const FONT: &str = "sans-serif";
const MAX_LANGUAGES: usize = 6;
const BARS_LEFT: i32 = 700;
const BAR_MAX_WIDTH: f64 = 380.0;
const BAR_HEIGHT: i32 = 18;
const ROW_TOP: i32 = 64;
const ROW_STEP: i32 = 44;

/// One language row on the raster card
#[derive(Debug, Clone, PartialEq)]
struct BarRow {
    label: String,
    percent_label: String,
    y: i32,
    width: i32,
    color: RGBColor,
}

fn bar_rows(summary: &WakaSummary) -> Vec<BarRow> {
    summary
        .languages
        .iter()
        .take(MAX_LANGUAGES)
        .enumerate()
        .map(|(i, lang)| BarRow {
            label: badges_common::truncate_string(&lang.name, 18),
            percent_label: format!("{:.1}%", lang.percent),
            y: ROW_TOP + i as i32 * ROW_STEP,
            width: (lang.percent.clamp(0.0, 100.0) / 100.0 * BAR_MAX_WIDTH).round() as i32,
            color: parse_color(lang.color),
        })
        .collect()
}

/// Text drawing that gives up after the first failure, so hosts without a
/// usable font still get a card with shapes but no labels.
struct Labels {
    enabled: bool,
}

impl Labels {
    fn new() -> Self {
        Self { enabled: true }
    }

    fn draw(&mut self, root: &DrawingArea<BitMapBackend<'_>, Shift>, text: String, pos: (i32, i32), style: TextStyle<'_>) {
        if !self.enabled {
            return;
        }
        if let Err(e) = root.draw(&Text::new(text, pos, style)) {
            warn!(
                font = FONT,
                error = %e,
                "Text rendering failed; the PNG card is drawn without labels. Install a sans-serif font (e.g. fonts-dejavu-core) to restore them"
            );
            self.enabled = false;
        }
    }
}

/// 1200×360 PNG card with hours, project count and language bars
#[derive(Debug, Clone, Default)]
pub struct WakaPngCard {
    style: CardStyle,
}

impl WakaPngCard {
    /// Image width in pixels
    pub const WIDTH: u32 = 1200;
    /// Image height in pixels
    pub const HEIGHT: u32 = 360;

    /// Create a card with the given colors
    pub fn new(style: CardStyle) -> Self {
        Self { style }
    }

    fn draw(&self, buffer: &mut [u8], summary: &WakaSummary) -> Result<()> {
        let root = BitMapBackend::with_buffer(buffer, (Self::WIDTH, Self::HEIGHT)).into_drawing_area();
        let background = parse_color(&self.style.background);
        let light = parse_color(&self.style.gold_light);
        let accent = parse_color(&self.style.accent);
        let muted = RGBColor(0x9f, 0xb3, 0xb3);
        let track = RGBColor(0x1d, 0x3a, 0x3d);

        root.fill(&background)?;
        root.draw(&Rectangle::new([(0, 0), (8, Self::HEIGHT as i32)], accent.filled()))?;

        let mut labels = Labels::new();
        labels.draw(
            &root,
            "WakaTime (All time)".to_string(),
            (48, 36),
            (FONT, 30).into_font().style(FontStyle::Bold).color(&light),
        );
        labels.draw(
            &root,
            summary.hours.clone(),
            (48, 96),
            (FONT, 96).into_font().style(FontStyle::Bold).color(&WHITE),
        );
        labels.draw(&root, "hrs coding".to_string(), (52, 206), (FONT, 26).into_font().color(&muted));
        let projects = match summary.projects {
            1 => "1 project".to_string(),
            n => format!("{n} projects"),
        };
        labels.draw(&root, projects, (52, 250), (FONT, 22).into_font().color(&accent));
        if let Some(username) = &summary.username {
            labels.draw(
                &root,
                format!("@{username}"),
                (52, Self::HEIGHT as i32 - 50),
                (FONT, 18).into_font().color(&muted),
            );
        }

        let rows = bar_rows(summary);
        if rows.is_empty() {
            labels.draw(
                &root,
                "No language data yet".to_string(),
                (BARS_LEFT - 180, ROW_TOP),
                (FONT, 22).into_font().color(&muted),
            );
        }
        for row in &rows {
            labels.draw(
                &root,
                row.label.clone(),
                (BARS_LEFT - 180, row.y - 2),
                (FONT, 20).into_font().color(&WHITE),
            );
            root.draw(&Rectangle::new(
                [(BARS_LEFT, row.y), (BARS_LEFT + BAR_MAX_WIDTH as i32, row.y + BAR_HEIGHT)],
                track.filled(),
            ))?;
            if row.width > 0 {
                root.draw(&Rectangle::new(
                    [(BARS_LEFT, row.y), (BARS_LEFT + row.width, row.y + BAR_HEIGHT)],
                    row.color.filled(),
                ))?;
            }
            labels.draw(
                &root,
                row.percent_label.clone(),
                (BARS_LEFT + BAR_MAX_WIDTH as i32 + 16, row.y - 2),
                (FONT, 20).into_font().style(FontStyle::Bold).color(&light),
            );
        }

        root.present()?;
        debug!(hours = %summary.hours, rows = rows.len(), labels = labels.enabled, "Drew WakaTime PNG card");
        Ok(())
    }

    /// Draw and encode the card as PNG bytes
    pub fn to_png(&self, summary: &WakaSummary) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; (Self::WIDTH * Self::HEIGHT * 3) as usize];
        self.draw(&mut buffer, summary)?;

        let image = RgbImage::from_raw(Self::WIDTH, Self::HEIGHT, buffer)
            .ok_or_else(|| BadgeError::render("Pixel buffer does not match the card size"))?;
        let mut out = Cursor::new(Vec::new());
        image
            .write_to(&mut out, ImageOutputFormat::Png)
            .map_err(|e| BadgeError::render_with_source("Failed to encode PNG", e))?;
        Ok(out.into_inner())
    }
}

impl BadgeRenderer for WakaPngCard {
    type Input = WakaSummary;

    fn render(&self, summary: &WakaSummary) -> Result<Vec<u8>> {
        self.to_png(summary)
    }

    fn name(&self) -> &'static str {
        "wakatime-png"
    }
}
