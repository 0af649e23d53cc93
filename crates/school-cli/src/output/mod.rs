//! Output formatting
//!
//! Every command renders through these helpers: rows become a table or a
//! JSON array, single records a one-row table or a JSON object. Status
//! messages go to stdout (success, info) or stderr (errors).

use colored::Colorize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const RULE: &str = "───────────────────────────────────────────────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("Invalid format: {}. Use 'table' or 'json'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

/// Pretty-printed JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn render_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::sharp()).to_string()
}

/// Rows as a table, or as a JSON array
pub fn print_output<T>(rows: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Table if rows.is_empty() => {
            println!("Nothing to show.");
            Ok(())
        }
        OutputFormat::Table => {
            println!("{}", render_table(rows));
            Ok(())
        }
    }
}

/// One record as a single-row table, or as a JSON object
pub fn print_single<T>(record: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Json => print_json(record),
        OutputFormat::Table => {
            println!("{}", render_table([record]));
            Ok(())
        }
    }
}

/// `json` in JSON mode, the display `rows` otherwise. For commands whose
/// JSON carries the full records rather than the trimmed table columns.
pub fn print_json_or_table<J, T>(json: &J, rows: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    J: Serialize + ?Sized,
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Json => print_json(json),
        OutputFormat::Table => print_output(rows, format),
    }
}

/// A titled section header for multi-table views
pub fn print_section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", RULE);
}

pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message.green());
    }
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}
