//! Item commands
//!
//! Commands for managing activities and assessments: list, add, delete, clear.

pub mod helpers;
mod mutations;
mod queries;
mod types;

use anyhow::Result;

use crate::commands::Context;

// Re-export public types
pub use types::ItemsAction;

pub async fn execute(ctx: &Context, action: ItemsAction) -> Result<()> {
    match action {
        ItemsAction::List { filters } => queries::list_items(ctx, filters).await,
        ItemsAction::Add(args) => mutations::add_item(ctx, args).await,
        ItemsAction::Delete { id, force } => mutations::delete_item(ctx, id, force).await,
        ItemsAction::Clear { force } => mutations::clear_items(ctx, force).await,
    }
}
