//! Folder domain entities.

pub mod contents;
pub mod model;
pub mod tree;

pub use contents::{DeletionSummary, FolderContents, FolderWithPath, RelocationSummary, RenamedFolder};
pub use model::{CreateFolder, Folder, ROOT_PATH};
pub use tree::{FolderNode, FolderTree};
