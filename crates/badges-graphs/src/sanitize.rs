//! Scrub generated SVG files before they are committed.
//!
//! Removes active content (scripts, embedded documents, event handlers),
//! links, and references to remote resources. The rules are regex based and
//! only ever delete markup.

use badges_common::{BadgeError, Result};
use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};
use tracing::{debug, info};

static BLOCK_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["script", "foreignObject", "iframe", "object", "embed"]
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}.*?</{tag}>")).expect("Invalid block regex"))
        .collect()
});

static ANCHOR_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\b[^>]*>").expect("Invalid anchor regex"));

static ANCHOR_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</a>").expect("Invalid anchor regex"));

static SCRIPT_HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+(?:xlink:href|href)\s*=\s*(?:"\s*javascript:[^'"]*"|'\s*javascript:[^'"]*')"#)
        .expect("Invalid href regex")
});

static EXTERNAL_HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+(?:xlink:href|href)\s*=\s*(?:"\s*https?://[^'"]*"|'\s*https?://[^'"]*')"#)
        .expect("Invalid href regex")
});

static REMOTE_IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<image\b[^>]*(?:xlink:href|href)\s*=\s*(?:"\s*https?://[^'"]*"|'\s*https?://[^'"]*')[^>]*>"#,
    )
    .expect("Invalid image regex")
});

static EVENT_HANDLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\s+on[a-z]+\s*=\s*(?:".*?"|'.*?')"#).expect("Invalid handler regex")
});

static XML_BASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+xml:base\s*=\s*(?:"[^'"]*"|'[^'"]*')"#).expect("Invalid xml:base regex")
});

static CSS_IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@import\s+url\([^)]+\);").expect("Invalid import regex"));

static BLANK_LINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid blank line regex"));

/// Return a scrubbed copy of `content`.
///
/// Rules apply in order: byte-order mark, script/foreignObject/iframe/object/embed
/// blocks, `<a>` tags (content kept), `javascript:` and external `http(s)` hrefs,
/// remote `<image>` elements, `on*` attributes, `xml:base`, CSS `@import url(...)`,
/// then runs of three or more newlines collapse to one blank line.
pub fn sanitize_svg(content: &str) -> String {
    let mut out = content.strip_prefix('\u{feff}').unwrap_or(content).to_string();

    for re in BLOCK_REGEXES.iter() {
        out = re.replace_all(&out, "").into_owned();
    }
    let removals: [&Regex; 8] = [
        &ANCHOR_OPEN_REGEX,
        &ANCHOR_CLOSE_REGEX,
        &SCRIPT_HREF_REGEX,
        &EXTERNAL_HREF_REGEX,
        &REMOTE_IMAGE_REGEX,
        &EVENT_HANDLER_REGEX,
        &XML_BASE_REGEX,
        &CSS_IMPORT_REGEX,
    ];
    for re in removals {
        out = re.replace_all(&out, "").into_owned();
    }
    BLANK_LINES_REGEX.replace_all(&out, "\n\n").into_owned()
}

/// Sanitize a file in place. Returns whether the file changed.
///
/// The file is only rewritten when sanitizing altered it.
pub fn sanitize_file(path: &Path) -> Result<bool> {
    let shown = path.display().to_string();
    let before = fs::read_to_string(path).map_err(|e| BadgeError::sanitize(&shown, e))?;
    let after = sanitize_svg(&before);

    if after == before {
        debug!(path = %shown, "No changes");
        return Ok(false);
    }

    fs::write(path, after).map_err(|e| BadgeError::sanitize(&shown, e))?;
    info!(path = %shown, "Sanitized");
    Ok(true)
}
