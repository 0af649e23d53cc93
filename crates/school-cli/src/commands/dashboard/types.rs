//! Dashboard types
//!
//! Types for dashboard commands and display.

use clap::Subcommand;
use school_core::{Kpis, DEFAULT_UPCOMING_LIMIT};
use serde::Serialize;
use tabled::Tabled;

use crate::commands::FilterArgs;

#[derive(Subcommand)]
pub enum DashboardAction {
    /// Show headline counts and the scope breakdown
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the next items due
    Upcoming {
        /// Number of items to show
        #[arg(short, long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
        limit: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show item counts per subject
    Subjects {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show item counts per class
    Classes {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Debug, Serialize, Tabled)]
pub struct StatsRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ScopeRow {
    #[tabled(rename = "Scope")]
    pub scope: String,
    #[tabled(rename = "Items")]
    pub count: usize,
    #[tabled(rename = "Share")]
    pub percentage: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct DimensionRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Name")]
    pub label: String,
    #[tabled(rename = "Items")]
    pub count: usize,
    #[tabled(rename = "")]
    #[serde(skip)]
    pub bar: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct UpcomingRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Subject")]
    pub subject: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Due")]
    pub due: String,
}

/// JSON shape of `dashboard stats`
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub kpis: Kpis,
    pub scopes: Vec<ScopeRow>,
}
