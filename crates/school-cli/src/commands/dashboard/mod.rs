//! Dashboard commands
//!
//! CLI commands for displaying dashboard statistics and charts.

mod charts;
mod helpers;
mod stats;
mod types;

use anyhow::Result;
use school_core::Dimension;

use crate::commands::Context;

// Re-export public types
pub use types::DashboardAction;

pub async fn execute(ctx: &Context, action: DashboardAction) -> Result<()> {
    match action {
        DashboardAction::Stats { filters } => stats::show_stats(ctx, filters).await,
        DashboardAction::Upcoming { limit, filters } => {
            charts::show_upcoming(ctx, filters, limit).await
        }
        DashboardAction::Subjects { filters } => {
            charts::show_dimension(ctx, filters, Dimension::Subject).await
        }
        DashboardAction::Classes { filters } => {
            charts::show_dimension(ctx, filters, Dimension::Class).await
        }
    }
}
