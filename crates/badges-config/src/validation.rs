//! Validation helpers and regex patterns used by the schema derives.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #ff0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Badge colors are passed to the views service without the `#`
pub static BARE_HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{6}$").expect("Invalid bare hex color regex pattern")
});

/// Number of steps in the heatmap color scale
pub const HEATMAP_STEPS: usize = 5;

/// Validate a log filter: either a bare level or an `EnvFilter`-style directive list
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

    let directives: Vec<&str> = level.split(',').map(str::trim).collect();
    let ok = !level.trim().is_empty()
        && directives.iter().all(|d| {
            let lvl = d.rsplit_once('=').map_or(*d, |(_, l)| l);
            LEVELS.contains(&lvl.to_ascii_lowercase().as_str())
        });

    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate the heatmap palette: exactly five `#rrggbb` colors, lightest first
pub fn validate_palette(colors: &[String]) -> Result<(), ValidationError> {
    if colors.len() != HEATMAP_STEPS {
        return Err(ValidationError::new("palette_length"));
    }
    if colors.iter().any(|c| !HEX_COLOR_REGEX.is_match(c)) {
        return Err(ValidationError::new("palette_color"));
    }
    Ok(())
}

/// Validate an output path (non-empty, no characters most filesystems reject)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

/// Validate a GitHub login (alphanumerics and single inner hyphens, at most 39 chars)
pub fn validate_github_login(login: &str) -> Result<(), ValidationError> {
    let valid = !login.is_empty()
        && login.len() <= 39
        && !login.starts_with('-')
        && !login.ends_with('-')
        && !login.contains("--")
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_github_login"))
    }
}
