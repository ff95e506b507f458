//! Folder tree structures for hierarchical display.
//!
//! A [`FolderTree`] is a read-only snapshot assembled from a flat list of
//! folder rows. It is rebuilt on every request and never written back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use grimoire_core::error::AppError;
use grimoire_core::result::AppResult;
use grimoire_core::types::FolderId;

use super::model::{Folder, ROOT_PATH, join_path};

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Full path.
    pub path: String,
    /// Number of spells filed directly in this folder.
    pub spell_count: u64,
    /// Number of direct child folders.
    pub child_count: u64,
    /// Child folder nodes, ordered by name.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Find the node with the given id in this subtree.
    pub fn find(&self, id: FolderId) -> Option<&FolderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, this node included.
    pub fn subtree_size(&self) -> u64 {
        1 + self.children.iter().map(FolderNode::subtree_size).sum::<u64>()
    }
}

/// A complete folder tree rooted at the root folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node.
    pub root: FolderNode,
    /// Total number of folders in the tree.
    pub total_folders: u64,
    /// Folders that were loaded but could not be reached from the root.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreachable: Vec<FolderId>,
}

impl FolderTree {
    /// Assemble a tree from every folder row and the per-folder spell counts.
    ///
    /// Children are sorted by name (ties broken by id). Fails with
    /// `NotFound` when no root row is present.
    pub fn build(folders: Vec<Folder>, spell_counts: &HashMap<FolderId, u64>) -> AppResult<Self> {
        let mut roots = Vec::new();
        let mut children: HashMap<FolderId, Vec<Folder>> = HashMap::new();

        for folder in folders {
            match folder.parent_id {
                None => roots.push(folder),
                Some(parent_id) => children.entry(parent_id).or_default().push(folder),
            }
        }

        roots.sort_by_key(|folder| folder.id);
        let mut roots = roots.into_iter();
        let root = roots
            .next()
            .ok_or_else(|| AppError::not_found("Root folder not found"))?;

        for siblings in children.values_mut() {
            siblings.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        }

        let root = build_node(root, ROOT_PATH.to_string(), &mut children, spell_counts);
        let total_folders = root.subtree_size();

        let mut unreachable: Vec<FolderId> = roots
            .chain(children.into_values().flatten())
            .map(|folder| folder.id)
            .collect();
        unreachable.sort();

        Ok(Self {
            root,
            total_folders,
            unreachable,
        })
    }
}

/// Build one node, consuming its children from the adjacency map so that
/// whatever remains afterwards is unreachable from the root.
fn build_node(
    folder: Folder,
    path: String,
    children: &mut HashMap<FolderId, Vec<Folder>>,
    spell_counts: &HashMap<FolderId, u64>,
) -> FolderNode {
    let nodes: Vec<FolderNode> = children
        .remove(&folder.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| {
            let child_path = join_path(&path, &child.name);
            build_node(child, child_path, children, spell_counts)
        })
        .collect();

    FolderNode {
        id: folder.id,
        name: folder.name,
        path,
        spell_count: spell_counts.get(&folder.id).copied().unwrap_or(0),
        child_count: nodes.len() as u64,
        children: nodes,
    }
}
