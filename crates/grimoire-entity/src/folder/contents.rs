//! Content summaries and results of the folder deletion strategies.

use serde::{Deserialize, Serialize};

use grimoire_core::types::FolderId;

use super::model::Folder;

/// A folder row together with its resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderWithPath {
    /// The folder row.
    #[serde(flatten)]
    pub folder: Folder,
    /// Full path from the root.
    pub path: String,
}

/// What a folder contains, directly and across its whole subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    /// The inspected folder.
    pub folder: FolderWithPath,
    /// Spells filed directly in the folder.
    pub spell_count: u64,
    /// Direct child folders.
    pub subfolder_count: u64,
    /// The direct child folders, ordered by name.
    pub subfolders: Vec<FolderWithPath>,
    /// Spells filed anywhere in the subtree, the folder itself included.
    pub total_spells_recursive: u64,
    /// Folders anywhere below the folder, the folder itself excluded.
    pub total_subfolders_recursive: u64,
}

impl FolderContents {
    /// Whether the folder holds neither spells nor subfolders.
    pub fn is_empty(&self) -> bool {
        self.spell_count == 0 && self.subfolder_count == 0
    }
}

/// Result of a recursive delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionSummary {
    /// The folder whose subtree was removed.
    pub folder_id: FolderId,
    /// Folders removed, the target included.
    pub folders_deleted: u64,
    /// Spells removed from the subtree.
    pub spells_deleted: u64,
}

/// A subfolder renamed while being hoisted into its grandparent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedFolder {
    /// The relocated folder.
    pub id: FolderId,
    /// Name before relocation.
    pub from: String,
    /// Name it received under the new parent.
    pub to: String,
}

/// Result of a contents-preserving delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationSummary {
    /// The folder that was removed.
    pub folder_id: FolderId,
    /// The parent that received its contents.
    pub target_id: FolderId,
    /// Spells refiled into the parent.
    pub spells_moved: u64,
    /// Direct subfolders reparented.
    pub folders_moved: u64,
    /// Subfolders that had to be renamed to avoid a sibling collision.
    pub renamed: Vec<RenamedFolder>,
}
