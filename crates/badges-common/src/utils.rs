//! Small helpers used by several pipelines.

use std::{fs, path::Path};

use crate::error::{BadgeError, Result};

/// Escape the five XML special characters for use in text nodes and attributes.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write `contents` to `path`, creating missing parent directories first.
pub fn write_file(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Extract the owner from a `GITHUB_REPOSITORY` value (`owner/repo`).
pub fn owner_from_repository(repository: &str) -> Result<String> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(owner.to_string()),
        _ => Err(BadgeError::missing_repository(format!(
            "expected GITHUB_REPOSITORY in owner/repo form, got {repository:?}"
        ))),
    }
}

/// Value of the first variable in `names` that is set and not blank.
pub fn first_env_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

/// Group digits with commas, e.g. `12345` becomes `12,345`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.svg");
        write_file(&path, "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn test_owner_from_repository() {
        assert_eq!(owner_from_repository("octocat/hello-world").unwrap(), "octocat");
        assert_eq!(owner_from_repository(" octocat/x ").unwrap(), "octocat");

        for bad in ["", "octocat", "/repo", "owner/"] {
            let err = owner_from_repository(bad).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad:?}");
        }
    }

    #[test]
    fn test_first_env_var_skips_blank() {
        std::env::set_var("BADGES_UTILS_TEST_BLANK", "  ");
        std::env::set_var("BADGES_UTILS_TEST_SET", "value");
        assert_eq!(
            first_env_var(&[
                "BADGES_UTILS_TEST_UNSET",
                "BADGES_UTILS_TEST_BLANK",
                "BADGES_UTILS_TEST_SET"
            ]),
            Some("value".to_string())
        );
        assert_eq!(first_env_var(&["BADGES_UTILS_TEST_UNSET"]), None);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("TypeScript", 20), "TypeScript");
        assert_eq!(truncate_string("Jupyter Notebook Extended", 10), "Jupyter N…");
        assert_eq!(truncate_string("日本語のテキスト", 4), "日本語…");
    }
}
