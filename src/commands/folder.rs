//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use grimoire_core::error::AppError;
use grimoire_core::types::FolderId;
use grimoire_database::DatabasePool;
use grimoire_database::repositories::FolderRepository;
use grimoire_entity::folder::{CreateFolder, FolderNode, FolderWithPath};

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show the whole folder tree
    Tree,
    /// Show a single folder
    Show {
        /// Folder ID
        id: FolderId,
    },
    /// Print the path of a folder
    Path {
        /// Folder ID
        id: FolderId,
    },
    /// Resolve a path such as `/Evocation/Fire` to a folder
    Resolve {
        /// Folder path
        path: String,
    },
    /// Summarize the contents of a folder
    Contents {
        /// Folder ID
        id: FolderId,
    },
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (defaults to the root)
        #[arg(short, long)]
        parent: Option<FolderId>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: FolderId,
        /// New name
        name: String,
    },
    /// Move a folder under a new parent
    Move {
        /// Folder ID
        id: FolderId,
        /// New parent folder ID
        parent: FolderId,
    },
    /// Delete a folder
    ///
    /// By default spells and subfolders are moved to the parent first.
    Delete {
        /// Folder ID
        id: FolderId,
        /// Delete every subfolder and spell as well
        #[arg(short, long)]
        recursive: bool,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Path
    path: String,
    /// Created at
    created_at: String,
}

impl From<&FolderWithPath> for FolderRow {
    fn from(f: &FolderWithPath) -> Self {
        Self {
            id: f.folder.id.to_string(),
            name: f.folder.name.clone(),
            path: f.path.clone(),
            created_at: f.folder.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    db: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let folder_repo = FolderRepository::new(db.pool().clone());

    match &args.command {
        FolderCommand::Tree => {
            let tree = folder_repo.find_all().await?;
            match format {
                OutputFormat::Json => output::print_json(&tree),
                OutputFormat::Table => {
                    let mut rendered = String::new();
                    render_tree(&tree.root, "", true, true, &mut rendered);
                    print!("{}", rendered);
                    println!("{} folder(s)", tree.total_folders);
                }
            }
        }
        FolderCommand::Show { id } => {
            let folder = folder_repo
                .find_by_id(*id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
            let path = folder_repo.get_path(*id).await?;
            let row = FolderRow::from(&FolderWithPath { folder, path });
            output::print_list(&[row], format);
        }
        FolderCommand::Path { id } => {
            println!("{}", folder_repo.get_path(*id).await?);
        }
        FolderCommand::Resolve { path } => {
            let folder = folder_repo
                .find_by_path(path)
                .await?
                .ok_or_else(|| AppError::not_found(format!("No folder at path '{path}'")))?;
            let path = folder_repo.get_path(folder.id).await?;
            let row = FolderRow::from(&FolderWithPath { folder, path });
            output::print_list(&[row], format);
        }
        FolderCommand::Contents { id } => {
            let contents = folder_repo.get_folder_contents(*id).await?;
            match format {
                OutputFormat::Json => output::print_json(&contents),
                OutputFormat::Table => {
                    println!("{}", contents.folder.path);
                    output::print_kv("Spells", &contents.spell_count.to_string());
                    output::print_kv("Subfolders", &contents.subfolder_count.to_string());
                    output::print_kv(
                        "Spells (recursive)",
                        &contents.total_spells_recursive.to_string(),
                    );
                    output::print_kv(
                        "Subfolders (recursive)",
                        &contents.total_subfolders_recursive.to_string(),
                    );
                    let rows: Vec<FolderRow> =
                        contents.subfolders.iter().map(FolderRow::from).collect();
                    if !rows.is_empty() {
                        output::print_list(&rows, format);
                    }
                }
            }
        }
        FolderCommand::Create { name, parent } => {
            let parent_id = parent.unwrap_or(FolderId::ROOT);
            let folder = folder_repo
                .create(&CreateFolder::new(parent_id, name.as_str()))
                .await?;
            let path = folder_repo.get_path(folder.id).await?;
            output::print_success(&format!("Folder '{}' created (id: {})", path, folder.id));
        }
        FolderCommand::Rename { id, name } => {
            let folder = folder_repo.rename(*id, name).await?;
            output::print_success(&format!("Folder {} renamed to '{}'", id, folder.name));
        }
        FolderCommand::Move { id, parent } => {
            folder_repo.move_folder(*id, *parent).await?;
            let path = folder_repo.get_path(*id).await?;
            output::print_success(&format!("Folder {} moved to '{}'", id, path));
        }
        FolderCommand::Delete { id, recursive } => {
            if *recursive {
                let summary = folder_repo.delete_recursive(*id).await?;
                match format {
                    OutputFormat::Json => output::print_json(&summary),
                    OutputFormat::Table => output::print_success(&format!(
                        "Deleted {} folder(s) and {} spell(s)",
                        summary.folders_deleted, summary.spells_deleted
                    )),
                }
            } else {
                let summary = folder_repo.move_contents_to_parent(*id).await?;
                match format {
                    OutputFormat::Json => output::print_json(&summary),
                    OutputFormat::Table => {
                        output::print_success(&format!(
                            "Folder {} deleted; moved {} spell(s) and {} folder(s) to folder {}",
                            id, summary.spells_moved, summary.folders_moved, summary.target_id
                        ));
                        for renamed in &summary.renamed {
                            output::print_kv(
                                &format!("Renamed {}", renamed.id),
                                &format!("{} -> {}", renamed.from, renamed.to),
                            );
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Render a subtree with box-drawing connectors.
fn render_tree(node: &FolderNode, prefix: &str, is_last: bool, is_root: bool, out: &mut String) {
    let label = if node.spell_count > 0 {
        format!("{} ({} spells) [{}]", node.name, node.spell_count, node.id)
    } else {
        format!("{} [{}]", node.name, node.id)
    };

    let child_prefix = if is_root {
        out.push_str(&format!("/ [{}]", node.id));
        if node.spell_count > 0 {
            out.push_str(&format!(" ({} spells)", node.spell_count));
        }
        out.push('\n');
        String::new()
    } else {
        let connector = if is_last { "└── " } else { "├── " };
        out.push_str(&format!("{prefix}{connector}{label}\n"));
        format!("{prefix}{}", if is_last { "    " } else { "│   " })
    };

    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_tree(child, &child_prefix, i + 1 == count, false, out);
    }
}
