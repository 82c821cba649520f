//! Smoothed daily contribution line for one year.

use badges_common::{escape_xml, Result};
use tracing::debug;

use crate::{
    calendar::YearContributions,
    renderer::BadgeRenderer,
    svg::{num, SvgDocument},
};

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 340;
const PAD_TOP: f64 = 44.0;
const PAD_RIGHT: f64 = 48.0;
const PAD_BOTTOM: f64 = 60.0;
const PAD_LEFT: f64 = 72.0;
const GRID_LINES: u32 = 10;
const DRAW_DURATION: &str = "2.5s";
const ARC_SAMPLES: usize = 16;

const MONTH_LABELS: [(usize, &str); 12] = [
    (0, "Jan"),
    (31, "Feb"),
    (59, "Mar"),
    (90, "Apr"),
    (120, "May"),
    (151, "Jun"),
    (181, "Jul"),
    (212, "Aug"),
    (243, "Sep"),
    (273, "Oct"),
    (304, "Nov"),
    (334, "Dec"),
];

/// Line chart colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChartStyle {
    /// Card background
    pub background: String,
    /// Curve stroke and area gradient
    pub stroke: String,
    /// Day markers
    pub dot: String,
    /// Title text
    pub text: String,
    /// Font stack for every label
    pub font_family: String,
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            background: "#0f1720".to_string(),
            stroke: "#1e40af".to_string(),
            dot: "#9be7ff".to_string(),
            text: "#e6eef6".to_string(),
            font_family: "'Comic Sans MS', 'Comic Sans', cursive".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

/// One cubic segment: two control points and the end point
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bezier {
    c1: Point,
    c2: Point,
    end: Point,
}

/// Convert a polyline to Catmull-Rom splines expressed as cubic Béziers.
///
/// The first and last points are duplicated as phantom neighbours.
fn catmull_rom_to_bezier(points: &[Point], alpha: f64) -> Vec<Bezier> {
    if points.len() < 2 {
        return Vec::new();
    }
    (0..points.len() - 1)
        .map(|i| {
            let p0 = if i == 0 { points[i] } else { points[i - 1] };
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points.get(i + 2).copied().unwrap_or(p2);
            let (t1x, t1y) = ((p2.x - p0.x) * alpha, (p2.y - p0.y) * alpha);
            let (t2x, t2y) = ((p3.x - p1.x) * alpha, (p3.y - p1.y) * alpha);
            Bezier {
                c1: Point { x: p1.x + t1x / 3.0, y: p1.y + t1y / 3.0 },
                c2: Point { x: p2.x - t2x / 3.0, y: p2.y - t2y / 3.0 },
                end: p2,
            }
        })
        .collect()
}

fn bezier_point(start: Point, b: &Bezier, t: f64) -> Point {
    let mt = 1.0 - t;
    let (a, bb, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
    Point {
        x: a * start.x + bb * b.c1.x + c * b.c2.x + d * b.end.x,
        y: a * start.y + bb * b.c1.y + c * b.c2.y + d * b.end.y,
    }
}

/// Approximate length of the whole curve by sampling each segment.
fn path_length(start: Point, beziers: &[Bezier]) -> f64 {
    let mut length = 0.0;
    let mut from = start;
    for b in beziers {
        let mut prev = from;
        for step in 1..=ARC_SAMPLES {
            let p = bezier_point(from, b, step as f64 / ARC_SAMPLES as f64);
            length += ((p.x - prev.x).powi(2) + (p.y - prev.y).powi(2)).sqrt();
            prev = p;
        }
        from = b.end;
    }
    length
}

fn path_data(start: Point, beziers: &[Bezier]) -> String {
    let mut d = format!("M {:.2} {:.2}", start.x, start.y);
    for b in beziers {
        d.push_str(&format!(
            " C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
            b.c1.x, b.c1.y, b.c2.x, b.c2.y, b.end.x, b.end.y
        ));
    }
    d
}

/// Daily contributions line chart renderer
#[derive(Debug, Clone, Default)]
pub struct DailyLineChart {
    style: LineChartStyle,
}

impl DailyLineChart {
    /// Create a chart with the given colors
    pub fn new(style: LineChartStyle) -> Self {
        Self { style }
    }

    fn plot_points(data: &YearContributions, max: u32) -> Vec<Point> {
        let plot_w = f64::from(WIDTH) - PAD_LEFT - PAD_RIGHT;
        let plot_h = f64::from(HEIGHT) - PAD_TOP - PAD_BOTTOM;
        let steps = data.days.len().saturating_sub(1).max(1) as f64;
        data.days
            .iter()
            .enumerate()
            .map(|(idx, day)| Point {
                x: PAD_LEFT + (idx as f64 / steps) * plot_w,
                y: PAD_TOP + plot_h - (f64::from(day.count) / f64::from(max)) * plot_h,
            })
            .collect()
    }

    /// Build the SVG text for a year of contributions
    pub fn to_svg(&self, data: &YearContributions) -> String {
        let s = &self.style;
        let (width, height) = (f64::from(WIDTH), f64::from(HEIGHT));
        let plot_h = height - PAD_TOP - PAD_BOTTOM;
        let baseline = PAD_TOP + plot_h;
        let max = data.max_count();

        let points = Self::plot_points(data, max);
        let start = points.first().copied().unwrap_or(Point { x: PAD_LEFT, y: baseline });
        let end = points.last().copied().unwrap_or(start);
        let beziers = catmull_rom_to_bezier(&points, 0.5);
        let curve = path_data(start, &beziers);
        let area = format!(
            "{curve} L {:.2} {:.2} L {:.2} {:.2} Z",
            end.x, baseline, start.x, baseline
        );
        let dash = path_length(start, &beziers).ceil() as u64;

        let mut doc = SvgDocument::new(WIDTH, HEIGHT).aria_label(format!(
            "Daily contributions for {} — {}",
            data.year, data.login
        ));
        doc.add_def(format!(
            r#"<linearGradient id="areaGradient" x1="0" x2="0" y1="0" y2="1"><stop offset="0%" stop-color="{0}" stop-opacity="0.16"/><stop offset="100%" stop-color="{0}" stop-opacity="0.02"/></linearGradient>"#,
            s.stroke
        ));
        doc.add_def(
            r#"<filter id="softGlow" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="6" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#,
        );
        doc.add_style(format!(
            r#"text, .label, .monthLabel {{ font-family: {font}; }}
.title {{ font-size:18px; fill:{text}; font-weight:700; }}
.label {{ font-size:10px; fill:#c7d2da; }}
.monthLabel {{ font-size:12px; fill:#cfe8ff; }}
.curve {{ fill:none; stroke:{stroke}; stroke-width:3; stroke-linecap:round; stroke-linejoin:round; filter:url(#softGlow); }}
.curve-glow {{ fill:none; stroke:{stroke}; stroke-width:10; stroke-opacity:0.06; stroke-linecap:round; stroke-linejoin:round; }}
.area {{ fill:url(#areaGradient); opacity:0; animation: fadeInArea 1.5s ease-in-out 0.5s forwards; }}
.dot {{ fill:{dot}; stroke:#063241; stroke-width:1; opacity:0; animation: fadeInDot 0.5s ease-in-out forwards; }}
@keyframes fadeInArea {{ to {{ opacity: 0.95; }} }}
@keyframes fadeInDot {{ to {{ opacity: 1; }} }}
.draw {{ stroke-dasharray: {dash}; stroke-dashoffset: {dash}; animation: drawLine {dur} cubic-bezier(0.4, 0, 0.2, 1) forwards; }}
@keyframes drawLine {{ to {{ stroke-dashoffset: 0; }} }}
.particle {{ fill:{dot}; stroke:#063241; stroke-width:1; }}"#,
            font = s.font_family,
            text = s.text,
            stroke = s.stroke,
            dot = s.dot,
            dash = dash,
            dur = DRAW_DURATION,
        ));

        doc.raw(format!(
            "<title>Daily contributions for {} — {}</title>",
            data.year,
            escape_xml(&data.login)
        ));
        doc.raw(format!(
            r#"<rect width="100%" height="100%" rx="12" fill="{}"/>"#,
            s.background
        ));
        doc.text(
            width / 2.0,
            PAD_TOP / 1.2,
            r#"text-anchor="middle" class="title""#,
            &format!("Daily Contributions — {}", data.year),
        );

        for i in 0..=GRID_LINES {
            let frac = f64::from(i) / f64::from(GRID_LINES);
            let gy = PAD_TOP + frac * plot_h;
            doc.line(
                PAD_LEFT,
                gy,
                width - PAD_RIGHT,
                gy,
                r#"stroke="rgba(255,255,255,0.04)" stroke-width="1" stroke-dasharray="4 4""#,
            );
            let value = ((1.0 - frac) * f64::from(max)).round() as u64;
            doc.text(
                PAD_LEFT - 12.0,
                gy + 4.0,
                r#"text-anchor="end" class="label""#,
                &value.to_string(),
            );
        }

        for (day_idx, label) in MONTH_LABELS {
            if let Some(p) = points.get(day_idx) {
                doc.text(
                    p.x,
                    height - 18.0,
                    r#"text-anchor="middle" class="monthLabel""#,
                    label,
                );
            }
        }

        doc.path(&area, r#"class="area""#);
        doc.path(&curve, r#"class="curve-glow""#);
        doc.path(&curve, r#"class="curve draw" id="mainPath""#);
        doc.raw(format!(
            r##"<circle class="particle" r="4"><animateMotion dur="{DRAW_DURATION}" begin="0s" fill="freeze"><mpath href="#mainPath"/></animateMotion></circle>"##
        ));

        let mut dots = 0usize;
        for (i, (day, p)) in data.days.iter().zip(&points).enumerate() {
            if day.count == 0 {
                continue;
            }
            dots += 1;
            doc.raw(format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="2" class="dot" style="animation-delay: {}s"><title>{}: {} contributions</title></circle>"#,
                p.x,
                p.y,
                num(0.5 + i as f64 * 0.002),
                day.date.format("%b %d, %Y"),
                day.count
            ));
            if f64::from(day.count) >= f64::from(max) * 0.5 {
                doc.text(
                    p.x,
                    p.y - 10.0,
                    r#"text-anchor="middle" class="label""#,
                    &day.count.to_string(),
                );
            }
        }

        let axis = r#"stroke="rgba(255,255,255,0.1)" stroke-width="1""#;
        doc.line(PAD_LEFT, baseline, width - PAD_RIGHT, baseline, axis);
        doc.line(PAD_LEFT, PAD_TOP, PAD_LEFT, baseline, axis);

        debug!(year = data.year, max, dots, dash, "Rendered daily line chart");
        doc.build()
    }
}

impl BadgeRenderer for DailyLineChart {
    type Input = YearContributions;

    fn render(&self, data: &YearContributions) -> Result<Vec<u8>> {
        Ok(self.to_svg(data).into_bytes())
    }

    fn name(&self) -> &'static str {
        "daily-line-chart"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badges_common::{test_utils::date, ContributionDay};

    fn pt(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_catmull_rom_segment_count() {
        assert!(catmull_rom_to_bezier(&[pt(0.0, 0.0)], 0.5).is_empty());
        let pts = [pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 10.0)];
        let beziers = catmull_rom_to_bezier(&pts, 0.5);
        assert_eq!(beziers.len(), 2);
        assert_eq!(beziers[1].end, pt(20.0, 10.0));
        // first segment uses the start point as its own phantom neighbour
        assert_eq!(beziers[0].c1, pt(10.0 * 0.5 / 3.0, 0.0));
    }

    #[test]
    fn test_straight_line_length() {
        let pts = [pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0), pt(30.0, 0.0)];
        let beziers = catmull_rom_to_bezier(&pts, 0.5);
        let length = path_length(pts[0], &beziers);
        assert!((length - 30.0).abs() < 1e-6, "length was {length}");
    }

    #[test]
    fn test_path_data_format() {
        let pts = [pt(0.0, 0.0), pt(3.0, 3.0)];
        let d = path_data(pts[0], &catmull_rom_to_bezier(&pts, 0.5));
        assert_eq!(d, "M 0.00 0.00 C 0.50 0.50, 2.50 2.50, 3.00 3.00");
    }

    #[test]
    fn test_chart_contents() {
        let days = vec![
            ContributionDay::new(date("2024-02-01"), 10),
            ContributionDay::new(date("2024-02-02"), 4),
            ContributionDay::new(date("2024-02-03"), 6),
        ];
        let data = YearContributions::new("octocat", 2024, &days);
        let svg = DailyLineChart::default().to_svg(&data);

        assert!(svg.contains(r#"width="1400" height="340""#));
        assert!(svg.contains("Daily Contributions — 2024</text>"));
        assert_eq!(svg.matches(r#"class="dot""#).count(), 3);
        assert!(svg.contains("<title>Feb 01, 2024: 10 contributions</title>"));
        // 10 and 6 reach half of the maximum, 4 does not
        assert!(svg.contains(r#"text-anchor="middle" class="label">10</text>"#));
        assert!(svg.contains(r#"text-anchor="middle" class="label">6</text>"#));
        assert!(!svg.contains(r#"text-anchor="middle" class="label">4</text>"#));
        assert_eq!(svg.matches(r#"stroke-dasharray="4 4""#).count(), 11);
        assert_eq!(svg.matches(r#"class="monthLabel""#).count(), 12);
        assert!(svg.contains(r#"id="mainPath""#));
    }

    #[test]
    fn test_dash_length_matches_curve() {
        let data = YearContributions::new("octocat", 2023, &[]);
        let points = DailyLineChart::plot_points(&data, data.max_count());
        let beziers = catmull_rom_to_bezier(&points, 0.5);
        // flat line across the plot width
        let plot_w = f64::from(WIDTH) - PAD_LEFT - PAD_RIGHT;
        let length = path_length(points[0], &beziers);
        assert!((length - plot_w).abs() < 1e-6, "length was {length}");

        let svg = DailyLineChart::default().to_svg(&data);
        assert!(svg.contains(&format!("stroke-dasharray: {};", length.ceil() as u64)));
        assert!(!svg.contains(r#"class="dot""#));
    }
}
