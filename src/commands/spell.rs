//! Spell filing CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use grimoire_core::error::AppError;
use grimoire_core::types::FolderId;
use grimoire_database::DatabasePool;
use grimoire_database::repositories::SpellRepository;
use grimoire_entity::spell::{CreateSpell, Spell};

use crate::output::{self, OutputFormat};

/// Arguments for spell commands
#[derive(Debug, Args)]
pub struct SpellArgs {
    /// Spell subcommand
    #[command(subcommand)]
    pub command: SpellCommand,
}

/// Spell subcommands
#[derive(Debug, Subcommand)]
pub enum SpellCommand {
    /// File a new spell in a folder
    Add {
        /// Spell name
        #[arg(short, long)]
        name: String,
        /// Folder ID (defaults to the root)
        #[arg(short, long)]
        folder: Option<FolderId>,
    },
    /// List spells
    List {
        /// Only list spells in this folder
        #[arg(short, long)]
        folder: Option<FolderId>,
    },
}

/// Spell display row
#[derive(Debug, Serialize, Tabled)]
struct SpellRow {
    /// Spell ID
    id: String,
    /// Name
    name: String,
    /// Folder ID
    folder: String,
    /// Created at
    created_at: String,
}

impl From<&Spell> for SpellRow {
    fn from(s: &Spell) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            folder: s.folder_id.to_string(),
            created_at: s.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute spell commands
pub async fn execute(
    args: &SpellArgs,
    db: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let spell_repo = SpellRepository::new(db.pool().clone());

    match &args.command {
        SpellCommand::Add { name, folder } => {
            let folder_id = folder.unwrap_or(FolderId::ROOT);
            let spell = spell_repo
                .create(&CreateSpell::new(folder_id, name.as_str()))
                .await?;
            output::print_success(&format!(
                "Spell '{}' filed in folder {} (id: {})",
                spell.name, spell.folder_id, spell.id
            ));
        }
        SpellCommand::List { folder } => {
            let spells = match folder {
                Some(folder_id) => spell_repo.find_in_folder(*folder_id).await?,
                None => spell_repo.find_all().await?,
            };
            let rows: Vec<SpellRow> = spells.iter().map(SpellRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
