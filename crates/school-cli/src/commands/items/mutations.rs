//! Item mutation commands
//!
//! Create and delete operations for items.

use anyhow::Result;
use school_core::{Accommodations, CreateItem, Error};

use super::helpers::{parse_due, resolve_item_id, short_id};
use super::types::{AddItemArgs, ItemRow};
use crate::commands::Context;
use crate::output::{print_error, print_single, print_success};

pub async fn add_item(ctx: &Context, args: AddItemArgs) -> Result<()> {
    let mut store = ctx.store().await?;

    let mut draft = CreateItem {
        kind: args.kind,
        scope: args.scope,
        subject: args.subject,
        title: args.title,
        description: args.description.unwrap_or_default(),
        points: args.points,
        due_at: args.due.as_deref().map(parse_due).transpose()?,
        accommodations: Accommodations {
            larger_font: args.larger_font,
            extra_time: args.extra_time,
            alternative_material: args.alt_material,
        },
        ..Default::default()
    };
    for class_id in &args.classes {
        draft.toggle_class(store.roster(), class_id, true);
    }
    for student_id in &args.students {
        draft.toggle_student(student_id, true);
    }

    let item = match store.add_item(&draft).await {
        Ok(item) => item,
        Err(Error::Validation(message)) => anyhow::bail!(message),
        Err(e) => return Err(e.into()),
    };

    print_success(
        &format!("Created {}: {}", item.kind, short_id(&item.id)),
        ctx.quiet,
    );
    if !ctx.quiet {
        print_single(&ItemRow::new(&item, store.roster()), ctx.format)?;
    }

    Ok(())
}

pub async fn delete_item(ctx: &Context, id: String, force: bool) -> Result<()> {
    let mut store = ctx.store().await?;
    let full_id = resolve_item_id(store.items(), &id)?;

    if !force {
        // Show item before deletion
        if let Some(item) = store.items().iter().find(|i| i.id == full_id) {
            print_single(&ItemRow::new(item, store.roster()), ctx.format)?;
        }
        print_error("Use --force to confirm deletion");
        return Ok(());
    }

    store.delete_item(&full_id).await?;
    print_success(&format!("Deleted item: {}", short_id(&full_id)), ctx.quiet);

    Ok(())
}

pub async fn clear_items(ctx: &Context, force: bool) -> Result<()> {
    let mut store = ctx.store().await?;
    let count = store.items().len();

    if !force {
        print_error(&format!(
            "This deletes all {} items. Use --force to confirm",
            count
        ));
        return Ok(());
    }

    store.clear_all().await?;
    print_success(&format!("Deleted {} items", count), ctx.quiet);

    Ok(())
}
