//! Config commands
//!
//! Show the resolved runtime configuration.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::print_output;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}

/// Config row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub async fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let rows: Vec<ConfigRow> = ctx
        .config
        .entries()
        .into_iter()
        .map(|entry| ConfigRow {
            key: entry.key.to_string(),
            value: if entry.value.is_empty() {
                "(not set)".to_string()
            } else {
                entry.value
            },
            source: entry.source.as_str().to_string(),
        })
        .collect();

    print_output(&rows, ctx.format)?;
    Ok(())
}
