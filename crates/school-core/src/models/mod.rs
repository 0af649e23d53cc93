//! Data models for the school platform
//!
//! Persisted shapes (`Item`, `Roster`) serialize with camelCase field names to
//! match the JSON documents stored under the versioned storage keys.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Items
// ============================================================================

/// Whether an item is coursework or an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Activity,
    Assessment,
}

/// Who an item targets: whole classes or specific students
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemScope {
    General,
    Individual,
}

/// Item lifecycle status. Only `Open` is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Open,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Activity => "activity",
            ItemKind::Assessment => "assessment",
        }
    }
}

impl ItemScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemScope::General => "general",
            ItemScope::Individual => "individual",
        }
    }
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Open => "open",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ItemScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activity" => Ok(ItemKind::Activity),
            "assessment" => Ok(ItemKind::Assessment),
            _ => Err(format!("Invalid kind: {}. Use 'activity' or 'assessment'", s)),
        }
    }
}

impl FromStr for ItemScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(ItemScope::General),
            "individual" => Ok(ItemScope::Individual),
            _ => Err(format!("Invalid scope: {}. Use 'general' or 'individual'", s)),
        }
    }
}

/// Per-item accommodations for students with specific needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodations {
    pub larger_font: bool,
    pub extra_time: bool,
    pub alternative_material: Option<String>,
}

/// An activity or assessment created by a teacher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub kind: ItemKind,
    pub scope: ItemScope,
    #[serde(default)]
    pub class_ids: Vec<String>,
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub subject: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub points: Option<f64>,
    /// Local wall-clock due time, as entered
    pub due_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub accommodations: Accommodations,
    pub created_at: DateTime<Utc>,
    pub status: ItemStatus,
}

/// Create item request (the teacher's creation form)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateItem {
    pub kind: ItemKind,
    pub scope: ItemScope,
    pub class_ids: Vec<String>,
    pub student_ids: Vec<String>,
    pub subject: String,
    pub title: String,
    pub description: String,
    pub points: Option<f64>,
    pub due_at: Option<NaiveDateTime>,
    pub accommodations: Accommodations,
}

impl Default for CreateItem {
    fn default() -> Self {
        Self {
            kind: ItemKind::Activity,
            scope: ItemScope::General,
            class_ids: Vec::new(),
            student_ids: Vec::new(),
            subject: String::new(),
            title: String::new(),
            description: String::new(),
            points: None,
            due_at: None,
            accommodations: Accommodations::default(),
        }
    }
}

impl CreateItem {
    /// Check or uncheck a class. Unchecking also drops any selected students
    /// of that class.
    pub fn toggle_class(&mut self, roster: &Roster, class_id: &str, checked: bool) {
        if checked {
            if !self.class_ids.iter().any(|c| c == class_id) {
                self.class_ids.push(class_id.to_string());
            }
            return;
        }

        self.class_ids.retain(|c| c != class_id);
        self.student_ids.retain(|sid| {
            roster
                .student(sid)
                .map(|s| s.class_id != class_id)
                .unwrap_or(true)
        });
    }

    /// Check or uncheck a student
    pub fn toggle_student(&mut self, student_id: &str, checked: bool) {
        if checked {
            if !self.student_ids.iter().any(|s| s == student_id) {
                self.student_ids.push(student_id.to_string());
            }
        } else {
            self.student_ids.retain(|s| s != student_id);
        }
    }

    /// Drop every class and student selection
    pub fn clear_selections(&mut self) {
        self.class_ids.clear();
        self.student_ids.clear();
    }

    /// Return the form to its initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Roster
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class_id: String,
}

/// Reference dataset of classes, subjects and students
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub classes: Vec<ClassGroup>,
    pub subjects: Vec<String>,
    pub students: Vec<Student>,
}

impl Roster {
    /// The built-in roster written on first use and restored on reset
    pub fn seed() -> Self {
        let class = |id: &str, name: &str| ClassGroup {
            id: id.to_string(),
            name: name.to_string(),
        };
        let student = |id: &str, name: &str, class_id: &str| Student {
            id: id.to_string(),
            name: name.to_string(),
            class_id: class_id.to_string(),
        };

        Self {
            classes: vec![
                class("1A", "1st A"),
                class("1B", "1st B"),
                class("2A", "2nd A"),
            ],
            subjects: [
                "Portuguese Language",
                "Mathematics",
                "History",
                "Geography",
                "Science",
                "English",
                "Life Project",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            students: vec![
                student("s1", "Ana Clara", "1A"),
                student("s2", "Bruno Lima", "1A"),
                student("s3", "Caio Souza", "1B"),
                student("s4", "Daniela Nunes", "1B"),
                student("s5", "Eduarda Melo", "2A"),
                student("s6", "Felipe Alves", "2A"),
            ],
        }
    }

    pub fn class(&self, id: &str) -> Option<&ClassGroup> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Students tagged with the given class, in roster order
    pub fn students_of<'a>(&'a self, class_id: &'a str) -> impl Iterator<Item = &'a Student> + 'a {
        self.students.iter().filter(move |s| s.class_id == class_id)
    }

    /// Class tag of a student, if the student is known
    pub fn class_of_student(&self, student_id: &str) -> Option<&str> {
        self.student(student_id).map(|s| s.class_id.as_str())
    }
}

// ============================================================================
// Filters and aggregates
// ============================================================================

/// Named due-date range relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueWindow {
    Today,
    #[serde(rename = "7d")]
    Next7Days,
    #[serde(rename = "30d")]
    Next30Days,
    Overdue,
    NoDate,
}

impl FromStr for DueWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(DueWindow::Today),
            "7d" | "next-7-days" => Ok(DueWindow::Next7Days),
            "30d" | "next-30-days" => Ok(DueWindow::Next30Days),
            "overdue" => Ok(DueWindow::Overdue),
            "no-date" | "nodate" => Ok(DueWindow::NoDate),
            _ => Err(format!(
                "Invalid window: {}. Use today, 7d, 30d, overdue or no-date",
                s
            )),
        }
    }
}

/// Item filters; `None` on a field imposes no constraint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilters {
    pub kind: Option<ItemKind>,
    pub scope: Option<ItemScope>,
    pub class_id: Option<String>,
    pub subject: Option<String>,
    pub due_window: Option<DueWindow>,
    pub query: Option<String>,
}

/// Grouping dimension for dashboard charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Subject,
    Class,
}

/// One bar of a dashboard chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionCount {
    /// Stable key: the subject text or the class id
    pub key: String,
    /// Display label: the subject text or the class name
    pub label: String,
    pub count: usize,
}

/// Headline counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total: usize,
    pub activity_count: usize,
    pub assessment_count: usize,
    pub general_count: usize,
    pub individual_count: usize,
    pub overdue_count: usize,
}
