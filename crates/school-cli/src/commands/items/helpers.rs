//! Item helper functions
//!
//! Shared utilities for item and dashboard commands.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use school_core::{Item, ItemScope, Roster};

/// Truncate string to max characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = chars[..max_chars - 3].iter().collect();
        format!("{}...", truncated)
    }
}

/// First eight characters of an id, for tables
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Parse a due date. Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM`, or a
/// bare `YYYY-MM-DD` meaning the end of that day.
pub fn parse_due(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(23, 59, 0))
        .ok_or_else(|| anyhow::anyhow!("Invalid due date: {}. Use YYYY-MM-DDTHH:MM", s))
}

pub fn format_due(due_at: Option<NaiveDateTime>) -> String {
    due_at
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Display names of whoever an item targets: class names for general
/// items, student names for individual ones. Unknown ids show as-is.
pub fn target_labels(item: &Item, roster: &Roster) -> Vec<String> {
    match item.scope {
        ItemScope::General => item
            .class_ids
            .iter()
            .map(|id| roster.class(id).map_or_else(|| id.clone(), |c| c.name.clone()))
            .collect(),
        ItemScope::Individual => item
            .student_ids
            .iter()
            .map(|id| roster.student(id).map_or_else(|| id.clone(), |s| s.name.clone()))
            .collect(),
    }
}

/// Resolve a short ID to a full item ID
pub fn resolve_item_id(items: &[Item], id: &str) -> Result<String> {
    let matches: Vec<&Item> = items.iter().filter(|i| i.id.starts_with(id)).collect();
    match matches.as_slice() {
        [] => Err(anyhow::anyhow!("Item not found: {}", id)),
        [item] => Ok(item.id.clone()),
        many => Err(anyhow::anyhow!(
            "Ambiguous item ID: {} matches {} items",
            id,
            many.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};
    use school_core::{Accommodations, ItemKind, ItemStatus};

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            kind: ItemKind::Activity,
            scope: ItemScope::General,
            class_ids: vec!["1A".to_string(), "9Z".to_string()],
            student_ids: vec![],
            subject: "Mathematics".to_string(),
            title: "Fractions".to_string(),
            description: String::new(),
            points: None,
            due_at: None,
            accommodations: Accommodations::default(),
            created_at: Utc::now(),
            status: ItemStatus::Open,
        }
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn test_parse_due_datetime_local() {
        let due = parse_due("2025-03-10T14:30").unwrap();
        assert_eq!(due.hour(), 14);
        assert_eq!(due.minute(), 30);
    }

    #[test]
    fn test_parse_due_bare_date_is_end_of_day() {
        let due = parse_due("2025-03-10").unwrap();
        assert_eq!((due.hour(), due.minute()), (23, 59));
    }

    #[test]
    fn test_parse_due_invalid() {
        let err = parse_due("next friday").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DDTHH:MM"));
    }

    // ========================================================================
    // Display
    // ========================================================================

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_target_labels_fall_back_to_ids() {
        let labels = target_labels(&item("x"), &Roster::seed());
        assert_eq!(labels, vec!["1st A".to_string(), "9Z".to_string()]);
    }

    #[test]
    fn test_format_due() {
        assert_eq!(format_due(None), "-");
        let due = parse_due("2025-03-10T08:05").unwrap();
        assert_eq!(format_due(Some(due)), "2025-03-10 08:05");
    }

    // ========================================================================
    // ID resolution
    // ========================================================================

    #[test]
    fn test_resolve_item_id() {
        let items = vec![item("abcd-1111"), item("abce-2222")];
        assert_eq!(resolve_item_id(&items, "abcd").unwrap(), "abcd-1111");
        assert!(resolve_item_id(&items, "abc")
            .unwrap_err()
            .to_string()
            .contains("Ambiguous"));
        assert!(resolve_item_id(&items, "zzz")
            .unwrap_err()
            .to_string()
            .contains("not found"));
    }
}
