//! Renderer trait and color helpers shared by every badge.

use badges_common::{write_file, Result};
use plotters::style::RGBColor;
use std::path::Path;
use tracing::info;

/// Something that turns an input record into image bytes.
pub trait BadgeRenderer {
    /// The record this renderer draws
    type Input: ?Sized;

    /// Render to an in-memory image (UTF-8 SVG text or encoded PNG)
    fn render(&self, input: &Self::Input) -> Result<Vec<u8>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Render and write to `path`, creating parent directories
    fn render_to_file(&self, input: &Self::Input, path: &Path) -> Result<()> {
        let bytes = self.render(input)?;
        write_file(path, &bytes)?;
        info!(renderer = self.name(), path = %path.display(), bytes = bytes.len(), "Wrote badge");
        Ok(())
    }
}

/// Parse a `#rrggbb` color, falling back to black when it is malformed.
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}
