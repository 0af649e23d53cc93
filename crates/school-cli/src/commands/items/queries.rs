//! Item query commands

use anyhow::Result;
use chrono::Local;
use school_core::filter_items;

use super::types::ItemRow;
use crate::commands::{Context, FilterArgs};
use crate::output::print_json_or_table;

pub async fn list_items(ctx: &Context, filters: FilterArgs) -> Result<()> {
    let store = ctx.store().await?;
    let filters = filters.into_filters()?;
    let now = Local::now().naive_local();

    let items = filter_items(store.items(), &filters, store.roster(), now);
    let rows: Vec<ItemRow> = items
        .iter()
        .map(|item| ItemRow::new(item, store.roster()))
        .collect();

    print_json_or_table(&items, &rows, ctx.format)
}
