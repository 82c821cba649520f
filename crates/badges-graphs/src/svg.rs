//! Minimal SVG document builder.
//!
//! Elements are collected as strings and assembled by [`SvgDocument::build`];
//! text content passed to [`SvgDocument::text`] is XML-escaped, attribute
//! strings are passed through as written.

use badges_common::escape_xml;

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let s = format!("{rounded:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Build SVG documents incrementally
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    aria_label: Option<String>,
    xlink: bool,
    styles: Vec<String>,
    defs: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgDocument {
    /// Create an empty document with a matching viewBox
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            aria_label: None,
            xlink: false,
            styles: vec![],
            defs: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Mark the document as an image with an accessible label
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Declare the `xlink` namespace (needed for `xlink:href`)
    pub fn with_xlink(mut self) -> Self {
        self.xlink = true;
        self
    }

    /// Document width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Document height
    pub fn height(&self) -> u32 {
        self.height
    }

    fn push(&mut self, markup: String) {
        let pad = "  ".repeat(self.indent);
        self.elements.push(format!("{pad}{markup}"));
    }

    /// Add a CSS block to the `<style>` element
    pub fn add_style(&mut self, css: impl Into<String>) {
        self.styles.push(css.into());
    }

    /// Add raw markup to `<defs>` (gradients, filters)
    pub fn add_def(&mut self, markup: impl Into<String>) {
        self.defs.push(markup.into());
    }

    /// Open a `<g>` with the given attributes
    pub fn open_group(&mut self, attrs: &str) {
        if attrs.is_empty() {
            self.push("<g>".to_string());
        } else {
            self.push(format!("<g {attrs}>"));
        }
        self.indent += 1;
    }

    /// Close the innermost group
    pub fn close_group(&mut self) {
        self.indent = self.indent.saturating_sub(1).max(1);
        self.push("</g>".to_string());
    }

    /// Add a rectangle
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, attrs: &str) {
        self.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            num(x),
            num(y),
            num(width),
            num(height),
            spaced(attrs)
        ));
    }

    /// Add a rectangle with a `<title>` tooltip
    pub fn rect_with_title(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        attrs: &str,
        title: &str,
    ) {
        self.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}><title>{}</title></rect>"#,
            num(x),
            num(y),
            num(width),
            num(height),
            spaced(attrs),
            escape_xml(title)
        ));
    }

    /// Add a text node; `content` is escaped
    pub fn text(&mut self, x: f64, y: f64, attrs: &str, content: &str) {
        self.push(format!(
            r#"<text x="{}" y="{}"{}>{}</text>"#,
            num(x),
            num(y),
            spaced(attrs),
            escape_xml(content)
        ));
    }

    /// Add a path
    pub fn path(&mut self, d: &str, attrs: &str) {
        self.push(format!(r#"<path d="{}"{}/>"#, d, spaced(attrs)));
    }

    /// Add a circle
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, attrs: &str) {
        self.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
            num(cx),
            num(cy),
            num(r),
            spaced(attrs)
        ));
    }

    /// Add an ellipse
    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, attrs: &str) {
        self.push(format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}"{}/>"#,
            num(cx),
            num(cy),
            num(rx),
            num(ry),
            spaced(attrs)
        ));
    }

    /// Add a straight line
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, attrs: &str) {
        self.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            spaced(attrs)
        ));
    }

    /// Add pre-built markup verbatim
    pub fn raw(&mut self, markup: impl Into<String>) {
        let markup = markup.into();
        self.push(markup);
    }

    /// Assemble the final document
    pub fn build(self) -> String {
        let mut svg = String::new();
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push('\n');

        svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        if self.xlink {
            svg.push_str(r#" xmlns:xlink="http://www.w3.org/1999/xlink""#);
        }
        svg.push_str(&format!(
            r#" width="{w}" height="{h}" viewBox="0 0 {w} {h}""#,
            w = self.width,
            h = self.height
        ));
        if let Some(label) = &self.aria_label {
            svg.push_str(&format!(r#" role="img" aria-label="{}""#, escape_xml(label)));
        }
        svg.push_str(">\n");

        if !self.styles.is_empty() {
            svg.push_str("  <style>\n");
            for style in &self.styles {
                for line in style.lines() {
                    svg.push_str("    ");
                    svg.push_str(line.trim_end());
                    svg.push('\n');
                }
            }
            svg.push_str("  </style>\n");
        }

        if !self.defs.is_empty() {
            svg.push_str("  <defs>\n");
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push('\n');
            }
            svg.push_str("  </defs>\n");
        }

        for element in &self.elements {
            svg.push_str(element);
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn spaced(attrs: &str) -> String {
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" {attrs}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(3.5), "3.5");
        assert_eq!(num(1.006), "1.01");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn test_build_minimal_document() {
        let mut doc = SvgDocument::new(10, 20).aria_label("a & b");
        doc.rect(0.0, 0.0, 10.0, 20.0, r##"fill="#fff""##);
        let svg = doc.build();

        assert_eq!(
            svg,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"20\" viewBox=\"0 0 10 20\" role=\"img\" aria-label=\"a &amp; b\">\n",
                "  <rect x=\"0\" y=\"0\" width=\"10\" height=\"20\" fill=\"#fff\"/>\n",
                "</svg>\n",
            )
        );
    }

    #[test]
    fn test_groups_indent_and_text_is_escaped() {
        let mut doc = SvgDocument::new(100, 100).with_xlink();
        doc.add_style(".a { fill: red; }");
        doc.add_def(r#"<linearGradient id="g"/>"#);
        doc.open_group(r#"transform="translate(1,2)""#);
        doc.text(0.0, 12.0, r#"class="a""#, "<Rust>");
        doc.close_group();
        let svg = doc.build();

        assert!(svg.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
        assert!(svg.contains("  <style>\n    .a { fill: red; }\n  </style>"));
        assert!(svg.contains("<defs>\n    <linearGradient id=\"g\"/>\n  </defs>"));
        assert!(svg.contains("  <g transform=\"translate(1,2)\">\n    <text x=\"0\" y=\"12\" class=\"a\">&lt;Rust&gt;</text>\n  </g>"));
    }

    #[test]
    fn test_rect_with_title() {
        let mut doc = SvgDocument::new(1, 1);
        doc.rect_with_title(1.0, 2.0, 3.0, 4.0, "", "2024-01-01 — 3 contributions");
        let svg = doc.build();
        assert!(svg.contains(
            r#"<rect x="1" y="2" width="3" height="4"><title>2024-01-01 — 3 contributions</title></rect>"#
        ));
    }
}
