//! Item command types

use clap::{Args, Subcommand};
use school_core::{Item, ItemKind, ItemScope, Roster};
use serde::Serialize;
use tabled::Tabled;

use super::helpers::{format_due, short_id, target_labels, truncate};
use crate::commands::FilterArgs;

#[derive(Subcommand)]
pub enum ItemsAction {
    /// List items, newest first
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Add an activity or assessment
    Add(AddItemArgs),

    /// Delete an item
    Delete {
        /// Item ID (a unique prefix is enough)
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Delete every item
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AddItemArgs {
    /// Item title
    #[arg(short, long)]
    pub title: String,

    /// Subject, one of the roster subjects
    #[arg(short, long)]
    pub subject: String,

    /// activity or assessment
    #[arg(short, long, default_value = "activity")]
    pub kind: ItemKind,

    /// general (whole classes) or individual (chosen students)
    #[arg(long, default_value = "general")]
    pub scope: ItemScope,

    /// Target class id (repeatable)
    #[arg(short, long = "class")]
    pub classes: Vec<String>,

    /// Target student id (repeatable)
    #[arg(long = "student")]
    pub students: Vec<String>,

    /// Description
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// Points
    #[arg(short, long)]
    pub points: Option<f64>,

    /// Due date and time (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub due: Option<String>,

    /// Accommodation: larger font
    #[arg(long)]
    pub larger_font: bool,

    /// Accommodation: extra time
    #[arg(long)]
    pub extra_time: bool,

    /// Accommodation: alternative material
    #[arg(long)]
    pub alt_material: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ItemRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Scope")]
    pub scope: String,
    #[tabled(rename = "Subject")]
    pub subject: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Targets")]
    pub targets: String,
    #[tabled(rename = "Due")]
    pub due: String,
    #[tabled(rename = "Points")]
    pub points: String,
}

impl ItemRow {
    pub fn new(item: &Item, roster: &Roster) -> Self {
        Self {
            id: short_id(&item.id).to_string(),
            kind: item.kind.to_string(),
            scope: item.scope.to_string(),
            subject: item.subject.clone(),
            title: truncate(&item.title, 40),
            targets: truncate(&target_labels(item, roster).join(", "), 30),
            due: format_due(item.due_at),
            points: item.points.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
        }
    }
}
