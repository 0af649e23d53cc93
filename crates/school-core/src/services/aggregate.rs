//! Read-side views over the item collection
//!
//! Everything here is a pure function of its inputs. "Now" is always passed
//! in so callers (and tests) control the clock; it is the local wall-clock
//! time that due dates are entered in.

use crate::models::{
    Dimension, DimensionCount, DueWindow, Item, ItemFilters, ItemKind, ItemScope, Kpis, Roster,
};
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;

pub const DEFAULT_UPCOMING_LIMIT: usize = 6;

/// Items matching every supplied filter, in input order
pub fn filter_items<'a>(
    items: &'a [Item],
    filters: &ItemFilters,
    roster: &Roster,
    now: NaiveDateTime,
) -> Vec<&'a Item> {
    let query = filters
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    items
        .iter()
        .filter(|item| filters.kind.map_or(true, |k| item.kind == k))
        .filter(|item| filters.scope.map_or(true, |s| item.scope == s))
        .filter(|item| {
            filters
                .subject
                .as_deref()
                .map_or(true, |s| item.subject == s)
        })
        .filter(|item| {
            filters
                .class_id
                .as_deref()
                .map_or(true, |class_id| targets_class(item, class_id, roster))
        })
        .filter(|item| {
            filters
                .due_window
                .map_or(true, |w| in_window(item.due_at, w, now))
        })
        .filter(|item| {
            query.as_deref().map_or(true, |q| {
                format!("{} {} {}", item.title, item.description, item.subject)
                    .to_lowercase()
                    .contains(q)
            })
        })
        .collect()
}

/// Whether an item reaches a class: directly for general items, through any
/// selected student's class for individual ones
fn targets_class(item: &Item, class_id: &str, roster: &Roster) -> bool {
    match item.scope {
        ItemScope::General => item.class_ids.iter().any(|c| c == class_id),
        ItemScope::Individual => item
            .student_ids
            .iter()
            .any(|sid| roster.class_of_student(sid) == Some(class_id)),
    }
}

/// Whether a due date falls in the given window relative to `now`
pub fn in_window(due_at: Option<NaiveDateTime>, window: DueWindow, now: NaiveDateTime) -> bool {
    let Some(due) = due_at else {
        return window == DueWindow::NoDate;
    };

    match window {
        DueWindow::NoDate => false,
        DueWindow::Today => due.date() == now.date() && due >= now,
        DueWindow::Next7Days => due >= now && due <= now + Duration::days(7),
        DueWindow::Next30Days => due >= now && due <= now + Duration::days(30),
        DueWindow::Overdue => due < now,
    }
}

/// Count items per subject or per class.
///
/// Subjects appear in first-seen order and only when used. Classes follow
/// roster order and are always all present, zero-filled; individual items add
/// one per selected student to that student's class.
pub fn aggregate_by_dimension(
    items: &[&Item],
    dimension: Dimension,
    roster: &Roster,
) -> Vec<DimensionCount> {
    match dimension {
        Dimension::Subject => {
            let mut counts: Vec<DimensionCount> = Vec::new();
            for item in items {
                match counts.iter_mut().find(|c| c.key == item.subject) {
                    Some(entry) => entry.count += 1,
                    None => counts.push(DimensionCount {
                        key: item.subject.clone(),
                        label: item.subject.clone(),
                        count: 1,
                    }),
                }
            }
            counts
        }
        Dimension::Class => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for item in items {
                match item.scope {
                    ItemScope::General => {
                        for class_id in &item.class_ids {
                            *counts.entry(class_id.as_str()).or_default() += 1;
                        }
                    }
                    ItemScope::Individual => {
                        for sid in &item.student_ids {
                            if let Some(class_id) = roster.class_of_student(sid) {
                                *counts.entry(class_id).or_default() += 1;
                            }
                        }
                    }
                }
            }

            roster
                .classes
                .iter()
                .map(|class| DimensionCount {
                    key: class.id.clone(),
                    label: class.name.clone(),
                    count: counts.get(class.id.as_str()).copied().unwrap_or(0),
                })
                .collect()
        }
    }
}

/// Items due now or later, soonest first, at most `limit`
pub fn rank_upcoming<'a>(items: &[&'a Item], limit: usize, now: NaiveDateTime) -> Vec<&'a Item> {
    let mut upcoming: Vec<&Item> = items
        .iter()
        .copied()
        .filter(|i| i.due_at.is_some_and(|d| d >= now))
        .collect();
    upcoming.sort_by_key(|i| i.due_at);
    upcoming.truncate(limit);
    upcoming
}

/// Headline counts over an already-filtered set
pub fn compute_kpis(items: &[&Item], now: NaiveDateTime) -> Kpis {
    items.iter().fold(Kpis::default(), |mut k, item| {
        k.total += 1;
        match item.kind {
            ItemKind::Activity => k.activity_count += 1,
            ItemKind::Assessment => k.assessment_count += 1,
        }
        match item.scope {
            ItemScope::General => k.general_count += 1,
            ItemScope::Individual => k.individual_count += 1,
        }
        if item.due_at.is_some_and(|d| d < now) {
            k.overdue_count += 1;
        }
        k
    })
}

/// Per-scope counts for the scope pie, general first
pub fn scope_breakdown(items: &[&Item]) -> Vec<(ItemScope, usize)> {
    let general = items
        .iter()
        .filter(|i| i.scope == ItemScope::General)
        .count();
    vec![
        (ItemScope::General, general),
        (ItemScope::Individual, items.len() - general),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Accommodations, ItemStatus};
    use chrono::{NaiveDate, Utc};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn item(id: &str, kind: ItemKind, scope: ItemScope, subject: &str) -> Item {
        Item {
            id: id.to_string(),
            kind,
            scope,
            class_ids: Vec::new(),
            student_ids: Vec::new(),
            subject: subject.to_string(),
            title: format!("Item {}", id),
            description: String::new(),
            points: None,
            due_at: None,
            accommodations: Accommodations::default(),
            created_at: Utc::now(),
            status: ItemStatus::Open,
        }
    }

    fn general(id: &str, classes: &[&str], subject: &str) -> Item {
        let mut i = item(id, ItemKind::Activity, ItemScope::General, subject);
        i.class_ids = classes.iter().map(|c| c.to_string()).collect();
        i
    }

    fn individual(id: &str, students: &[&str], subject: &str) -> Item {
        let mut i = item(id, ItemKind::Assessment, ItemScope::Individual, subject);
        i.student_ids = students.iter().map(|s| s.to_string()).collect();
        i
    }

    fn due(mut i: Item, offset: Duration) -> Item {
        i.due_at = Some(now() + offset);
        i
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    // ========================================================================
    // filter_items
    // ========================================================================

    #[test]
    fn test_no_filters_returns_everything() {
        let items = vec![general("a", &["1A"], "History"), individual("b", &["s3"], "Science")];
        let result = filter_items(&items, &ItemFilters::default(), &Roster::seed(), now());
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_by_kind_scope_subject() {
        let items = vec![
            general("a", &["1A"], "History"),
            individual("b", &["s1"], "History"),
            general("c", &["1B"], "Science"),
        ];
        let roster = Roster::seed();

        let by_kind = ItemFilters {
            kind: Some(ItemKind::Assessment),
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(&items, &by_kind, &roster, now())), vec!["b"]);

        let by_scope_subject = ItemFilters {
            scope: Some(ItemScope::General),
            subject: Some("History".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_items(&items, &by_scope_subject, &roster, now())),
            vec!["a"]
        );
    }

    #[test]
    fn test_filter_by_class_follows_students_for_individual_items() {
        let items = vec![
            general("a", &["1A", "2A"], "History"),
            individual("b", &["s3"], "History"),
            individual("c", &["s1", "s5"], "History"),
        ];
        let filters = ItemFilters {
            class_id: Some("1B".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(&items, &filters, &Roster::seed(), now())), vec!["b"]);

        let filters = ItemFilters {
            class_id: Some("2A".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_items(&items, &filters, &Roster::seed(), now())),
            vec!["a", "c"]
        );
    }

    #[test]
    fn test_query_is_case_insensitive_over_title_description_subject() {
        let mut a = general("a", &["1A"], "History");
        a.title = "Fractions worksheet".to_string();
        let mut b = general("b", &["1A"], "Mathematics");
        b.description = "Read chapter FOUR".to_string();
        let c = general("c", &["1A"], "Geography");
        let items = vec![a, b, c];
        let roster = Roster::seed();

        let q = |text: &str| ItemFilters {
            query: Some(text.to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(&items, &q("FRACTIONS"), &roster, now())), vec!["a"]);
        assert_eq!(ids(&filter_items(&items, &q("four"), &roster, now())), vec!["b"]);
        assert_eq!(ids(&filter_items(&items, &q("geog"), &roster, now())), vec!["c"]);
        assert_eq!(filter_items(&items, &q("   "), &roster, now()).len(), 3);
    }

    #[test]
    fn test_no_date_window_matches_exactly_undated_items() {
        let items = vec![
            general("undated-a", &["1A"], "History"),
            due(general("past", &["1A"], "History"), Duration::days(-2)),
            due(individual("soon", &["s1"], "Science"), Duration::hours(1)),
            individual("undated-b", &["s2"], "Science"),
        ];
        let filters = ItemFilters {
            due_window: Some(DueWindow::NoDate),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_items(&items, &filters, &Roster::seed(), now())),
            vec!["undated-a", "undated-b"]
        );
    }

    #[test]
    fn test_due_windows() {
        let n = now();
        let at = |d: Duration| Some(n + d);

        // Today: same calendar day, not yet past
        assert!(in_window(at(Duration::hours(3)), DueWindow::Today, n));
        assert!(in_window(Some(n), DueWindow::Today, n));
        assert!(!in_window(at(Duration::hours(-1)), DueWindow::Today, n));
        assert!(!in_window(at(Duration::hours(13)), DueWindow::Today, n));

        assert!(in_window(at(Duration::days(7)), DueWindow::Next7Days, n));
        assert!(!in_window(at(Duration::days(7) + Duration::seconds(1)), DueWindow::Next7Days, n));
        assert!(!in_window(at(Duration::minutes(-1)), DueWindow::Next7Days, n));

        assert!(in_window(at(Duration::days(30)), DueWindow::Next30Days, n));
        assert!(!in_window(at(Duration::days(31)), DueWindow::Next30Days, n));

        assert!(in_window(at(Duration::seconds(-1)), DueWindow::Overdue, n));
        assert!(!in_window(Some(n), DueWindow::Overdue, n));

        for window in [
            DueWindow::Today,
            DueWindow::Next7Days,
            DueWindow::Next30Days,
            DueWindow::Overdue,
        ] {
            assert!(!in_window(None, window, n));
        }
        assert!(in_window(None, DueWindow::NoDate, n));
        assert!(!in_window(Some(n), DueWindow::NoDate, n));
    }

    // ========================================================================
    // aggregate_by_dimension
    // ========================================================================

    #[test]
    fn test_class_aggregation_enumerates_every_class() {
        let roster = Roster::seed();
        let items: Vec<Item> = Vec::new();
        let refs: Vec<&Item> = items.iter().collect();

        let counts = aggregate_by_dimension(&refs, Dimension::Class, &roster);
        assert_eq!(counts.len(), roster.classes.len());
        assert!(counts.iter().all(|c| c.count == 0));
        assert_eq!(counts[0].key, "1A");
        assert_eq!(counts[0].label, "1st A");
    }

    #[test]
    fn test_class_aggregation_attributes_individual_items_via_students() {
        let roster = Roster::seed();
        let items = vec![
            general("a", &["1A", "2A"], "History"),
            individual("b", &["s1", "s2", "s3"], "Science"),
            individual("c", &["ghost"], "Science"),
        ];
        let refs: Vec<&Item> = items.iter().collect();

        let counts: Vec<(String, usize)> = aggregate_by_dimension(&refs, Dimension::Class, &roster)
            .into_iter()
            .map(|c| (c.key, c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("1A".to_string(), 3),
                ("1B".to_string(), 1),
                ("2A".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_subject_aggregation_only_reports_used_subjects_in_first_seen_order() {
        let items = vec![
            general("a", &["1A"], "Science"),
            general("b", &["1A"], "History"),
            general("c", &["1B"], "Science"),
        ];
        let refs: Vec<&Item> = items.iter().collect();

        let counts = aggregate_by_dimension(&refs, Dimension::Subject, &Roster::seed());
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.label.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Science", 2), ("History", 1)]);
    }

    // ========================================================================
    // rank_upcoming / compute_kpis / scope_breakdown
    // ========================================================================

    #[test]
    fn test_rank_upcoming_sorts_and_limits() {
        let items: Vec<Item> = (0..8)
            .map(|n| due(general(&format!("d{}", n), &["1A"], "History"), Duration::days(8 - n)))
            .chain([
                due(general("past", &["1A"], "History"), Duration::days(-1)),
                general("undated", &["1A"], "History"),
                due(general("now", &["1A"], "History"), Duration::zero()),
            ])
            .collect();
        let refs: Vec<&Item> = items.iter().collect();

        let top = rank_upcoming(&refs, DEFAULT_UPCOMING_LIMIT, now());
        assert_eq!(ids(&top), vec!["now", "d7", "d6", "d5", "d4", "d3"]);

        let top = rank_upcoming(&refs, 2, now());
        assert_eq!(ids(&top), vec!["now", "d7"]);
    }

    #[test]
    fn test_compute_kpis() {
        let items = vec![
            due(general("a", &["1A"], "History"), Duration::days(-1)),
            due(individual("b", &["s1"], "Science"), Duration::days(2)),
            individual("c", &["s2"], "Science"),
            general("d", &["1B"], "History"),
        ];
        let refs: Vec<&Item> = items.iter().collect();

        let kpis = compute_kpis(&refs, now());
        assert_eq!(
            kpis,
            Kpis {
                total: 4,
                activity_count: 2,
                assessment_count: 2,
                general_count: 2,
                individual_count: 2,
                overdue_count: 1,
            }
        );
    }

    #[test]
    fn test_scope_breakdown() {
        let items = vec![
            general("a", &["1A"], "History"),
            individual("b", &["s1"], "Science"),
            individual("c", &["s2"], "Science"),
        ];
        let refs: Vec<&Item> = items.iter().collect();
        assert_eq!(
            scope_breakdown(&refs),
            vec![(ItemScope::General, 1), (ItemScope::Individual, 2)]
        );
    }
}
