//! Roster commands
//!
//! Show the classes, subjects and students, or restore the seed roster.

use anyhow::Result;
use clap::Subcommand;
use school_core::{CreateItem, Roster};
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::{print_error, print_json, print_output, print_section, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum RosterAction {
    /// Show classes, subjects and students
    Show,

    /// Discard the stored roster and restore the seed
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
pub struct ClassRow {
    #[tabled(rename = "Class")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Students")]
    pub students: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct StudentRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Class")]
    pub class_id: String,
}

pub async fn execute(ctx: &Context, action: RosterAction) -> Result<()> {
    match action {
        RosterAction::Show => show_roster(ctx).await,
        RosterAction::Reset { force } => reset_roster(ctx, force).await,
    }
}

async fn show_roster(ctx: &Context) -> Result<()> {
    let store = ctx.store().await?;
    print_roster(store.roster(), ctx.format)
}

async fn reset_roster(ctx: &Context, force: bool) -> Result<()> {
    if !force {
        print_error("This replaces the roster with the seed. Use --force to confirm");
        return Ok(());
    }

    let mut store = ctx.store().await?;
    let mut draft = CreateItem::default();
    store.reset_roster_to_seed(&mut draft).await?;

    print_success("Roster reset to seed", ctx.quiet);
    if !ctx.quiet {
        print_roster(store.roster(), ctx.format)?;
    }
    Ok(())
}

fn print_roster(roster: &Roster, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(roster);
    }

    let classes: Vec<ClassRow> = roster
        .classes
        .iter()
        .map(|c| ClassRow {
            id: c.id.clone(),
            name: c.name.clone(),
            students: roster.students_of(&c.id).count(),
        })
        .collect();
    print_section("Classes");
    print_output(&classes, format)?;

    print_section("Subjects");
    println!("{}", roster.subjects.join(", "));

    let students: Vec<StudentRow> = roster
        .students
        .iter()
        .map(|s| StudentRow {
            id: s.id.clone(),
            name: s.name.clone(),
            class_id: s.class_id.clone(),
        })
        .collect();
    print_section("Students");
    print_output(&students, format)
}
