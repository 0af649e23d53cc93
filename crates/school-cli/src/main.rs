//! School CLI - items, roster, dashboard and account flows
//!
//! A command-line front end for the school platform: teachers manage
//! activities and assessments and read the dashboard, students browse their
//! subjects, and anyone can walk the sign-up, recovery and sign-in flows.

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use school_core::SchoolConfig;

#[derive(Parser)]
#[command(name = "school")]
#[command(author, version, about = "School platform CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override database path (or set SCHOOL_DB_PATH env var)
    #[arg(long, env = "SCHOOL_DB_PATH", global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage activities and assessments
    Items {
        #[command(subcommand)]
        action: commands::items::ItemsAction,
    },

    /// Show or reset classes, subjects and students
    Roster {
        #[command(subcommand)]
        action: commands::roster::RosterAction,
    },

    /// Dashboard statistics over items
    Dashboard {
        #[command(subcommand)]
        action: commands::dashboard::DashboardAction,
    },

    /// Sign up, recover a password or sign in
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },

    /// Browse the student subject grid
    Subjects(commands::subjects::SubjectsArgs),

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = SchoolConfig::from_env()?;
    if let Some(db_path) = cli.db {
        config = config.with_db_path(db_path);
    }

    // Initialize database
    let db = school_core::Database::open(config.db_path.clone()).await?;

    // Create context for commands
    let ctx = commands::Context {
        db,
        config,
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Items { action } => commands::items::execute(&ctx, action).await,
        Commands::Roster { action } => commands::roster::execute(&ctx, action).await,
        Commands::Dashboard { action } => commands::dashboard::execute(&ctx, action).await,
        Commands::Account { action } => commands::account::execute(&ctx, action).await,
        Commands::Subjects(args) => commands::subjects::execute(&ctx, args).await,
        Commands::Config { action } => commands::config::execute(&ctx, action).await,
    }
}
