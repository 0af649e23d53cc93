//! Subject grid command
//!
//! The student landing page: subject cards with search, filter and sort,
//! plus the content list of a single subject.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use school_core::{
    filter_subjects, sample_subjects, sample_topics, subject_name, SubjectCard, SubjectFilter,
    SubjectSort, Topic,
};
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::{print_json, print_json_or_table, print_output, print_section, OutputFormat};

#[derive(Args, Debug)]
pub struct SubjectsArgs {
    #[command(subcommand)]
    pub action: Option<SubjectsAction>,

    /// Search subject name or teacher
    #[arg(long)]
    pub query: Option<String>,

    /// all, new or pending
    #[arg(long, default_value = "all")]
    pub filter: SubjectFilter,

    /// az, progress or recent
    #[arg(long, default_value = "az")]
    pub sort: SubjectSort,
}

#[derive(Subcommand, Debug)]
pub enum SubjectsAction {
    /// List the topics of one subject
    Topics {
        /// Subject ID (e.g. mat)
        id: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
pub struct SubjectRow {
    #[tabled(rename = "Subject")]
    pub name: String,
    #[tabled(rename = "Teacher")]
    pub teacher: String,
    #[tabled(rename = "Progress")]
    pub progress: String,
    #[tabled(rename = "New")]
    pub has_new: String,
    #[tabled(rename = "Due today")]
    pub due_today: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl SubjectRow {
    fn new(card: &SubjectCard, now: DateTime<Utc>) -> Self {
        Self {
            name: card.name.clone(),
            teacher: card.teacher.clone(),
            progress: format!("{}%", card.progress),
            has_new: if card.has_new { "yes" } else { "" }.to_string(),
            due_today: if card.due_today { "yes" } else { "" }.to_string(),
            updated: relative_age(card.updated_at, now),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct TopicRow {
    #[tabled(rename = "Topic")]
    pub title: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&Topic> for TopicRow {
    fn from(topic: &Topic) -> Self {
        Self {
            title: topic.title.clone(),
            duration: format!("{} min", topic.duration_min),
            status: topic.status.to_string(),
        }
    }
}

/// Coarse "how long ago" label
fn relative_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes().max(0);
    match minutes {
        0 => "just now".to_string(),
        1..=59 => format!("{}m ago", minutes),
        60..=1439 => format!("{}h ago", minutes / 60),
        _ => format!("{}d ago", minutes / 1440),
    }
}

pub async fn execute(ctx: &Context, args: SubjectsArgs) -> Result<()> {
    if let Some(SubjectsAction::Topics { id }) = args.action {
        return show_topics(ctx, &id);
    }

    let now = Utc::now();
    let cards = sample_subjects(now);
    let visible = filter_subjects(&cards, args.query.as_deref().unwrap_or(""), args.filter, args.sort);

    let rows: Vec<SubjectRow> = visible.iter().map(|c| SubjectRow::new(c, now)).collect();
    print_json_or_table(&visible, &rows, ctx.format)
}

fn show_topics(ctx: &Context, id: &str) -> Result<()> {
    let topics = sample_topics(id);
    if ctx.format == OutputFormat::Json {
        return print_json(&topics);
    }

    let name = subject_name(&sample_subjects(Utc::now()), id);
    print_section(&format!("{} - Topics", name));
    if topics.is_empty() {
        println!("No content here yet.");
        return Ok(());
    }
    let rows: Vec<TopicRow> = topics.iter().map(TopicRow::from).collect();
    print_output(&rows, ctx.format)
}
