//! Dashboard stats command
//!
//! Headline counts and the general/individual split for the filtered items.

use anyhow::Result;
use chrono::Local;
use school_core::{compute_kpis, filter_items, scope_breakdown};

use super::helpers::percent;
use super::types::{ScopeRow, StatsReport, StatsRow};
use crate::commands::{Context, FilterArgs};
use crate::output::{print_json, print_output, print_section, OutputFormat};

pub async fn show_stats(ctx: &Context, filters: FilterArgs) -> Result<()> {
    let store = ctx.store().await?;
    let filters = filters.into_filters()?;
    let now = Local::now().naive_local();

    let items = filter_items(store.items(), &filters, store.roster(), now);
    let kpis = compute_kpis(&items, now);
    let scopes: Vec<ScopeRow> = scope_breakdown(&items)
        .into_iter()
        .map(|(scope, count)| ScopeRow {
            scope: scope.to_string(),
            count,
            percentage: percent(count, kpis.total),
        })
        .collect();

    if ctx.format == OutputFormat::Json {
        return print_json(&StatsReport { kpis, scopes });
    }

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  Dashboard");
    println!("║  As of {}", now.format("%Y-%m-%d %H:%M"));
    println!("╚══════════════════════════════════════════════════════════════╝");

    let stats = vec![
        StatsRow { metric: "Total items".to_string(), value: kpis.total.to_string() },
        StatsRow { metric: "Activities".to_string(), value: kpis.activity_count.to_string() },
        StatsRow { metric: "Assessments".to_string(), value: kpis.assessment_count.to_string() },
        StatsRow { metric: "Overdue".to_string(), value: kpis.overdue_count.to_string() },
    ];
    print_section("Items");
    print_output(&stats, ctx.format)?;

    print_section("Scope");
    print_output(&scopes, ctx.format)?;

    Ok(())
}
