//! Dashboard chart commands
//!
//! Per-subject and per-class counts, and the upcoming list.

use anyhow::Result;
use chrono::Local;
use school_core::{aggregate_by_dimension, filter_items, rank_upcoming, Dimension};

use super::helpers::bar;
use super::types::{DimensionRow, UpcomingRow};
use crate::commands::items::helpers::{format_due, short_id, truncate};
use crate::commands::{Context, FilterArgs};
use crate::output::print_output;

const BAR_WIDTH: usize = 20;

pub async fn show_dimension(ctx: &Context, filters: FilterArgs, dimension: Dimension) -> Result<()> {
    let store = ctx.store().await?;
    let filters = filters.into_filters()?;
    let now = Local::now().naive_local();

    let items = filter_items(store.items(), &filters, store.roster(), now);
    let counts = aggregate_by_dimension(&items, dimension, store.roster());
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);

    let rows: Vec<DimensionRow> = counts
        .into_iter()
        .map(|c| DimensionRow {
            bar: bar(c.count, max, BAR_WIDTH),
            key: c.key,
            label: c.label,
            count: c.count,
        })
        .collect();

    print_output(&rows, ctx.format)
}

pub async fn show_upcoming(ctx: &Context, filters: FilterArgs, limit: usize) -> Result<()> {
    let store = ctx.store().await?;
    let filters = filters.into_filters()?;
    let now = Local::now().naive_local();

    let items = filter_items(store.items(), &filters, store.roster(), now);
    let rows: Vec<UpcomingRow> = rank_upcoming(&items, limit, now)
        .into_iter()
        .map(|item| UpcomingRow {
            id: short_id(&item.id).to_string(),
            kind: item.kind.to_string(),
            subject: item.subject.clone(),
            title: truncate(&item.title, 40),
            due: format_due(item.due_at),
        })
        .collect();

    print_output(&rows, ctx.format)
}
