//! CLI command definitions and dispatch.

pub mod folder;
pub mod migrate;
pub mod spell;

use clap::{Parser, Subcommand};

use grimoire_core::config::AppConfig;
use grimoire_core::error::AppError;
use grimoire_database::DatabasePool;
use grimoire_database::migration::run_migrations;

use crate::output::OutputFormat;

/// Grimoire: spell folder administration
#[derive(Debug, Parser)]
#[command(name = "grimoire", version, about, long_about = None)]
pub struct Cli {
    /// Path to a single configuration file (skips the layered lookup)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay merged over `config/default.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Folder tree management
    Folder(folder::FolderArgs),
    /// Spell filing
    Spell(spell::SpellArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let db = open_database(config).await?;

        let result = match &self.command {
            Commands::Migrate => migrate::execute(&db).await,
            Commands::Folder(args) => folder::execute(args, &db, self.format).await,
            Commands::Spell(args) => spell::execute(args, &db, self.format).await,
        };

        db.close().await;
        result
    }
}

/// Helper: connect and bring the schema up to date.
///
/// Every command runs against a migrated schema, so migrations are applied
/// up front; the `migrate` command only reports on them.
async fn open_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;
    Ok(db)
}
