//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod account;
pub mod config;
pub mod dashboard;
pub mod items;
pub mod roster;
pub mod subjects;

use anyhow::Result;
use clap::Args;
use std::str::FromStr;
use school_core::{Database, DueWindow, ItemFilters, ItemKind, ItemScope, ItemStore, SchoolConfig};

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub db: Database,
    pub config: SchoolConfig,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Open the item store over the context database
    pub async fn store(&self) -> Result<ItemStore<Database>> {
        Ok(ItemStore::open(self.db.clone()).await?)
    }
}

/// Item filters shared by list and dashboard commands. Each accepts `any`
/// (or `all`) for "no constraint".
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter by kind (activity, assessment)
    #[arg(long)]
    pub kind: Option<String>,

    /// Filter by scope (general, individual)
    #[arg(long)]
    pub scope: Option<String>,

    /// Filter by class id (individual items match through their students)
    #[arg(long = "class")]
    pub class_id: Option<String>,

    /// Filter by subject
    #[arg(long)]
    pub subject: Option<String>,

    /// Filter by due window (today, 7d, 30d, overdue, no-date)
    #[arg(long)]
    pub window: Option<String>,

    /// Search title, description and subject
    #[arg(long)]
    pub query: Option<String>,
}

fn is_unconstrained(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case("any") || raw.eq_ignore_ascii_case("all")
}

fn parse_filter<T: FromStr<Err = String>>(raw: Option<String>) -> Result<Option<T>> {
    match raw {
        Some(raw) if !is_unconstrained(&raw) => {
            Ok(Some(raw.trim().parse().map_err(anyhow::Error::msg)?))
        }
        _ => Ok(None),
    }
}

fn text_filter(raw: Option<String>) -> Option<String> {
    raw.filter(|r| !is_unconstrained(r))
}

impl FilterArgs {
    pub fn into_filters(self) -> Result<ItemFilters> {
        Ok(ItemFilters {
            kind: parse_filter::<ItemKind>(self.kind)?,
            scope: parse_filter::<ItemScope>(self.scope)?,
            class_id: text_filter(self.class_id),
            subject: text_filter(self.subject),
            due_window: parse_filter::<DueWindow>(self.window)?,
            query: self.query.filter(|q| !q.trim().is_empty()),
        })
    }
}
