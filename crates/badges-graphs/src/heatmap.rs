//! Month-by-month contribution heatmap.
//!
//! Twelve small calendars laid out three per row. Each month is a grid of
//! week columns by weekday rows (Sunday on top), each cell colored by a
//! five-step scale relative to the busiest day of the year.

use badges_common::Result;
use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::{calendar::YearContributions, renderer::BadgeRenderer, svg::SvgDocument};

const CELL: u32 = 12;
const GAP: u32 = 3;
const MONTH_PADDING: u32 = 24;
const MONTHS_PER_ROW: u32 = 3;
const MONTH_NAME_HEIGHT: u32 = 18;
const LEGEND_STEP: u32 = CELL + 2;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Heatmap color scale and text colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapStyle {
    /// Five colors from "no contributions" to "busiest"
    pub colors: Vec<String>,
    /// Month title color
    pub title_color: String,
    /// Legend text color
    pub legend_color: String,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            colors: ["#ebedf0", "#c6e48b", "#7bc96f", "#239a3b", "#196127"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            title_color: "#0b1220".to_string(),
            legend_color: "#666".to_string(),
        }
    }
}

impl HeatmapStyle {
    /// Scale index for `count`: 0 for no contributions, else `ceil(count / max * 4)` capped at 4.
    pub fn bucket(count: u32, max: u32) -> usize {
        if count == 0 {
            return 0;
        }
        let ratio = f64::from(count) / f64::from(max.max(1));
        ((ratio * 4.0).ceil() as usize).clamp(1, 4)
    }

    /// Fill color for `count`
    pub fn color_for(&self, count: u32, max: u32) -> &str {
        let idx = Self::bucket(count, max);
        self.colors
            .get(idx)
            .or_else(|| self.colors.last())
            .map(String::as_str)
            .unwrap_or("#ebedf0")
    }
}

/// Geometry of one month block
#[derive(Debug, Clone)]
struct MonthLayout {
    month0: u32,
    first_weekday: u32,
    columns: u32,
}

impl MonthLayout {
    fn new(year: i32, month0: u32, days_in_month: u32) -> Self {
        let first_weekday = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0);
        let columns = (first_weekday + days_in_month).div_ceil(7);
        Self {
            month0,
            first_weekday,
            columns,
        }
    }

    fn width_px(&self) -> u32 {
        (self.columns * (CELL + GAP)).saturating_sub(GAP)
    }

    fn cell_origin(&self, day_of_month: u32) -> (u32, u32) {
        let slot = day_of_month - 1 + self.first_weekday;
        ((slot / 7) * (CELL + GAP), (slot % 7) * (CELL + GAP))
    }
}

/// Monthly heatmap renderer
#[derive(Debug, Clone, Default)]
pub struct MonthlyHeatmap {
    style: HeatmapStyle,
}

impl MonthlyHeatmap {
    /// Create a heatmap with the given colors
    pub fn new(style: HeatmapStyle) -> Self {
        Self { style }
    }

    /// `(width, height, column width, row height)` for a year's months
    fn dimensions(layouts: &[MonthLayout]) -> (u32, u32, u32, u32) {
        let rows_px = 7 * (CELL + GAP) - GAP;
        let col_width = layouts.iter().map(MonthLayout::width_px).max().unwrap_or(0) + 8;
        let row_height = rows_px + 28;
        let rows = 12u32.div_ceil(MONTHS_PER_ROW);
        let width = MONTHS_PER_ROW * col_width + (MONTHS_PER_ROW + 1) * MONTH_PADDING;
        let height = rows * row_height + (rows + 1) * MONTH_PADDING;
        (width, height, col_width, row_height)
    }

    /// Build the SVG text for a year of contributions
    pub fn to_svg(&self, data: &YearContributions) -> String {
        let max = data.max_count();
        let layouts: Vec<MonthLayout> = (0..12)
            .map(|m| MonthLayout::new(data.year, m, data.month(m).count() as u32))
            .collect();
        let (width, height, col_width, row_height) = Self::dimensions(&layouts);

        let mut doc = SvgDocument::new(width, height).aria_label(format!(
            "GitHub contributions ({}) - month by month",
            data.year
        ));
        doc.add_style(format!(
            r#".label {{ font-family: Inter, Arial, sans-serif; font-size:12px; fill:#222; }}
.small {{ font-size:10px; fill:{legend}; }}
.month-name {{ font-family: Inter, Arial, sans-serif; font-size:13px; fill:{title}; font-weight:600; }}
.cell {{ rx: 2; ry: 2; }}"#,
            legend = self.style.legend_color,
            title = self.style.title_color,
        ));

        for layout in &layouts {
            let col = layout.month0 % MONTHS_PER_ROW;
            let row = layout.month0 / MONTHS_PER_ROW;
            let origin_x = MONTH_PADDING + col * (col_width + MONTH_PADDING);
            let origin_y = MONTH_PADDING + row * (row_height + MONTH_PADDING);

            doc.open_group(&format!(r#"transform="translate({origin_x}, {origin_y})""#));
            doc.text(
                0.0,
                12.0,
                r#"class="month-name""#,
                &format!("{} {}", MONTH_NAMES[layout.month0 as usize], data.year),
            );

            for day in data.month(layout.month0) {
                let (x, y) = layout.cell_origin(day.date.day());
                doc.rect_with_title(
                    f64::from(x),
                    f64::from(y + MONTH_NAME_HEIGHT),
                    f64::from(CELL),
                    f64::from(CELL),
                    &format!(
                        r#"class="cell" fill="{}" stroke="rgba(0,0,0,0.06)" stroke-width="0.5""#,
                        self.style.color_for(day.count, max)
                    ),
                    &format!("{} — {} contributions", day.date, day.count),
                );
            }

            doc.open_group(&format!(
                r#"transform="translate({}, {})""#,
                layout.width_px() + 8,
                MONTH_NAME_HEIGHT
            ));
            doc.text(0.0, -6.0, r#"class="small""#, "Less");
            for (ci, color) in self.style.colors.iter().enumerate() {
                doc.rect(
                    (ci as u32 * LEGEND_STEP) as f64,
                    -4.0,
                    f64::from(CELL),
                    f64::from(CELL),
                    &format!(r#"fill="{color}" stroke="rgba(0,0,0,0.06)" stroke-width="0.4""#),
                );
            }
            doc.text(
                f64::from(self.style.colors.len() as u32 * LEGEND_STEP + 6),
                6.0,
                r#"class="small""#,
                "More",
            );
            doc.close_group();
            doc.close_group();
        }

        debug!(year = data.year, max, width, height, "Rendered monthly heatmap");
        doc.build()
    }
}

impl BadgeRenderer for MonthlyHeatmap {
    type Input = YearContributions;

    fn render(&self, data: &YearContributions) -> Result<Vec<u8>> {
        Ok(self.to_svg(data).into_bytes())
    }

    fn name(&self) -> &'static str {
        "monthly-heatmap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badges_common::{test_utils::date, ContributionDay};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(HeatmapStyle::bucket(0, 10), 0);
        assert_eq!(HeatmapStyle::bucket(1, 10), 1);
        assert_eq!(HeatmapStyle::bucket(3, 10), 2);
        assert_eq!(HeatmapStyle::bucket(5, 10), 2);
        assert_eq!(HeatmapStyle::bucket(6, 10), 3);
        assert_eq!(HeatmapStyle::bucket(10, 10), 4);
        assert_eq!(HeatmapStyle::bucket(7, 0), 4);
    }

    #[test]
    fn test_color_for_uses_scale() {
        let style = HeatmapStyle::default();
        assert_eq!(style.color_for(0, 8), "#ebedf0");
        assert_eq!(style.color_for(8, 8), "#196127");
        assert_eq!(style.color_for(2, 8), "#c6e48b");
    }

    #[test]
    fn test_month_layout_columns() {
        // June 2024 starts on a Saturday: 6 + 30 days spans 6 weeks
        let june = MonthLayout::new(2024, 5, 30);
        assert_eq!(june.first_weekday, 6);
        assert_eq!(june.columns, 6);
        assert_eq!(june.width_px(), 6 * 15 - 3);
        assert_eq!(june.cell_origin(1), (0, 90));
        assert_eq!(june.cell_origin(2), (15, 0));

        // February 2015 starts on a Sunday and fills exactly four weeks
        let feb = MonthLayout::new(2015, 1, 28);
        assert_eq!(feb.columns, 4);
    }

    #[test]
    fn test_svg_dimensions_for_2024() {
        let data = YearContributions::new("octocat", 2024, &[]);
        let layouts: Vec<MonthLayout> = (0..12)
            .map(|m| MonthLayout::new(2024, m, data.month(m).count() as u32))
            .collect();
        let (width, height, col_width, row_height) = MonthlyHeatmap::dimensions(&layouts);
        assert_eq!(col_width, 6 * 15 - 3 + 8);
        assert_eq!(row_height, 130);
        assert_eq!(width, 3 * col_width + 4 * 24);
        assert_eq!(height, 4 * 130 + 5 * 24);
    }

    #[test]
    fn test_cells_titles_and_legend() {
        let days = vec![
            ContributionDay::new(date("2024-01-01"), 2),
            ContributionDay::new(date("2024-03-10"), 8),
        ];
        let data = YearContributions::new("octocat", 2024, &days);
        let svg = MonthlyHeatmap::default().to_svg(&data);

        assert!(svg.contains(r#"aria-label="GitHub contributions (2024) - month by month""#));
        assert!(svg.contains(">January 2024</text>"));
        assert!(svg.contains(">December 2024</text>"));
        assert!(svg.contains("<title>2024-01-01 — 2 contributions</title>"));
        assert!(svg.contains("<title>2024-03-10 — 8 contributions</title>"));
        assert!(svg.contains("<title>2024-02-29 — 0 contributions</title>"));
        assert_eq!(svg.matches(r#"class="cell""#).count(), 366);
        assert_eq!(svg.matches(">Less</text>").count(), 12);
        assert_eq!(svg.matches(">More</text>").count(), 12);
        // 2024-01-01 is a Monday: first column, second row
        assert!(svg.contains(r##"<rect x="0" y="33" width="12" height="12" class="cell" fill="#c6e48b""##));
    }
}
