//! Student subject grid and per-subject topic lists

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A subject tile on the student landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCard {
    pub id: String,
    pub name: String,
    pub teacher: String,
    /// Completion percentage, 0..=100
    pub progress: u8,
    pub has_new: bool,
    pub due_today: bool,
    pub last_topic_id: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectFilter {
    #[default]
    All,
    /// Cards with new content
    New,
    /// Cards not yet completed
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectSort {
    /// By name, A to Z
    #[default]
    Alphabetical,
    /// Least progress first
    Progress,
    /// Most recently updated first
    Recent,
}

impl FromStr for SubjectFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SubjectFilter::All),
            "new" => Ok(SubjectFilter::New),
            "pending" => Ok(SubjectFilter::Pending),
            _ => Err(format!("Invalid filter: {}. Use all, new or pending", s)),
        }
    }
}

impl FromStr for SubjectSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "az" | "alphabetical" => Ok(SubjectSort::Alphabetical),
            "progress" => Ok(SubjectSort::Progress),
            "recent" => Ok(SubjectSort::Recent),
            _ => Err(format!("Invalid sort: {}. Use az, progress or recent", s)),
        }
    }
}

/// Demo cards, with update times relative to `now`
pub fn sample_subjects(now: DateTime<Utc>) -> Vec<SubjectCard> {
    let card = |id: &str,
                name: &str,
                teacher: &str,
                progress: u8,
                has_new: bool,
                due_today: bool,
                topic: &str,
                age: Duration| SubjectCard {
        id: id.to_string(),
        name: name.to_string(),
        teacher: teacher.to_string(),
        progress,
        has_new,
        due_today,
        last_topic_id: topic.to_string(),
        updated_at: now - age,
    };

    vec![
        card("mat", "Mathematics", "Prof. Carlos", 42, true, true, "linear-functions-1", Duration::hours(2)),
        card("port", "Portuguese", "Prof. Ana", 10, false, false, "reading-comprehension", Duration::days(3)),
        card("hist", "History", "Prof. Davi", 100, false, false, "industrial-revolution", Duration::minutes(30)),
        card("bio", "Biology", "Prof. Julia", 65, true, false, "basic-cytology", Duration::hours(6)),
        card("fis", "Physics", "Prof. Renan", 5, false, true, "kinematics-intro", Duration::hours(14)),
        card("geo", "Geography", "Prof. Bia", 77, false, false, "world-climates", Duration::hours(48)),
    ]
}

/// Study progress on a single topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicStatus {
    Done,
    InProgress,
    Todo,
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicStatus::Done => write!(f, "Done"),
            TopicStatus::InProgress => write!(f, "In progress"),
            TopicStatus::Todo => write!(f, "To do"),
        }
    }
}

/// One entry in a subject's content list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub duration_min: u32,
    pub status: TopicStatus,
}

/// Fallback name for a subject id with no card
pub const UNKNOWN_SUBJECT: &str = "Subject";

/// Display name of a subject id, from the demo cards
pub fn subject_name(cards: &[SubjectCard], id: &str) -> String {
    cards
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string())
}

/// Demo topic list for a subject. Unknown ids have no topics.
pub fn sample_topics(subject_id: &str) -> Vec<Topic> {
    let topic = |id: &str, title: &str, duration_min: u32, status: TopicStatus| Topic {
        id: id.to_string(),
        title: title.to_string(),
        duration_min,
        status,
    };

    match subject_id {
        "mat" => vec![
            topic("fra-01", "Fractions - Part 1", 15, TopicStatus::Done),
            topic("fra-02", "Fractions - Part 2", 20, TopicStatus::InProgress),
        ],
        _ => Vec::new(),
    }
}

/// Cards matching the query and filter, in the requested order
pub fn filter_subjects(
    cards: &[SubjectCard],
    query: &str,
    filter: SubjectFilter,
    sort: SubjectSort,
) -> Vec<SubjectCard> {
    let q = query.trim().to_lowercase();

    let mut out: Vec<SubjectCard> = cards
        .iter()
        .filter(|c| {
            q.is_empty() || c.name.to_lowercase().contains(&q) || c.teacher.to_lowercase().contains(&q)
        })
        .filter(|c| match filter {
            SubjectFilter::All => true,
            SubjectFilter::New => c.has_new,
            SubjectFilter::Pending => c.progress < 100,
        })
        .cloned()
        .collect();

    match sort {
        SubjectSort::Alphabetical => out.sort_by_key(|c| c.name.to_lowercase()),
        SubjectSort::Progress => out.sort_by_key(|c| c.progress),
        SubjectSort::Recent => out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }

    out
}
