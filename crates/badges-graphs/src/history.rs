//! Profile-views snapshot and day-by-day history files.

use badges_common::{write_file, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, warn};

/// History is trimmed to the most recent ten years of daily entries
pub const MAX_HISTORY_ENTRIES: usize = 3650;

/// Latest view count, overwritten on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsSnapshot {
    /// Views reported by the counter
    pub views: u64,
    /// Day the count was taken
    pub date: NaiveDate,
}

impl ViewsSnapshot {
    /// Write as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_file(path, json)
    }
}

/// One day in the history file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsEntry {
    /// Day the count was taken
    pub date: NaiveDate,
    /// Views reported by the counter
    pub views: u64,
}

/// Read the history; a missing or unreadable file starts a new one.
pub fn load_history(path: &Path) -> Vec<ViewsEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No views history yet");
            return Vec::new();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Views history is not a list of entries; starting over");
        Vec::new()
    })
}

/// Record `views` for `date` and rewrite the history file.
///
/// When the newest entry already has `date` its count is replaced, otherwise
/// a new entry is appended. Oldest entries beyond [`MAX_HISTORY_ENTRIES`]
/// are dropped.
pub fn append_history(path: &Path, date: NaiveDate, views: u64) -> Result<Vec<ViewsEntry>> {
    let mut history = load_history(path);
    match history.last_mut() {
        Some(last) if last.date == date => last.views = views,
        _ => history.push(ViewsEntry { date, views }),
    }
    if history.len() > MAX_HISTORY_ENTRIES {
        let excess = history.len() - MAX_HISTORY_ENTRIES;
        history.drain(..excess);
    }

    let json = serde_json::to_string_pretty(&history)?;
    write_file(path, json)?;
    debug!(path = %path.display(), entries = history.len(), "Updated views history");
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use badges_common::test_utils::date;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/history.json");
        let history = append_history(&path, date("2024-05-01"), 10).unwrap();
        assert_eq!(history, vec![ViewsEntry { date: date("2024-05-01"), views: 10 }]);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  {\n    \"date\": \"2024-05-01\",\n    \"views\": 10\n  }\n]");
    }

    #[test]
    fn test_same_day_replaces_last_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        append_history(&path, date("2024-05-01"), 10).unwrap();
        append_history(&path, date("2024-05-02"), 12).unwrap();
        let history = append_history(&path, date("2024-05-02"), 15).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[1], ViewsEntry { date: date("2024-05-02"), views: 15 });
        assert_eq!(load_history(&path), history);
    }

    #[test]
    fn test_history_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let start = date("2010-01-01");
        let existing: Vec<ViewsEntry> = start
            .iter_days()
            .take(MAX_HISTORY_ENTRIES)
            .enumerate()
            .map(|(i, d)| ViewsEntry { date: d, views: i as u64 })
            .collect();
        fs::write(&path, serde_json::to_string(&existing).unwrap()).unwrap();

        let next = existing.last().unwrap().date.succ_opt().unwrap();
        let history = append_history(&path, next, 99_999).unwrap();
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history[0].date, date("2010-01-02"));
        assert_eq!(history.last().unwrap().views, 99_999);
    }

    #[test]
    fn test_invalid_history_starts_over() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"views": 3}"#).unwrap();
        let history = append_history(&path, date("2024-05-01"), 4).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_snapshot_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        ViewsSnapshot { views: 1234, date: date("2024-05-01") }.save(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"views\": 1234,\n  \"date\": \"2024-05-01\"\n}"
        );
    }
}
