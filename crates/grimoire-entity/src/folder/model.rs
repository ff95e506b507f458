//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use grimoire_core::error::AppError;
use grimoire_core::result::AppResult;
use grimoire_core::types::FolderId;

/// Path of the root folder.
pub const ROOT_PATH: &str = "/";

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Longest folder name accepted on write.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

/// A folder in the grimoire hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Parent folder ID (null only for the root folder).
    pub parent_id: Option<FolderId>,
    /// Folder name, unique among its siblings.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is the root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Parent folder.
    pub parent_id: FolderId,
    /// Folder name.
    pub name: String,
}

impl CreateFolder {
    /// Build a create request for a folder named `name` under `parent_id`.
    pub fn new(parent_id: FolderId, name: impl Into<String>) -> Self {
        Self {
            parent_id,
            name: name.into(),
        }
    }
}

/// Validate a folder name and return it trimmed.
///
/// Names may not be blank, may not contain the path separator and are
/// limited to [`MAX_FOLDER_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if trimmed.contains(PATH_SEPARATOR) {
        return Err(AppError::validation(format!(
            "Folder name '{trimmed}' cannot contain '{PATH_SEPARATOR}'"
        )));
    }
    if trimmed.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(AppError::validation(format!(
            "Folder name cannot be longer than {MAX_FOLDER_NAME_LEN} characters"
        )));
    }
    Ok(trimmed)
}

/// Append `name` to a parent path.
pub fn join_path(parent_path: &str, name: &str) -> String {
    if parent_path == ROOT_PATH {
        format!("{ROOT_PATH}{name}")
    } else {
        format!("{parent_path}{PATH_SEPARATOR}{name}")
    }
}

/// Render a root-to-leaf list of names (root excluded) as a path.
pub fn render_path<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut path = String::new();
    for name in names {
        path.push(PATH_SEPARATOR);
        path.push_str(name);
    }
    if path.is_empty() {
        path.push_str(ROOT_PATH);
    }
    path
}

/// Split a path into its non-empty segments.
///
/// Leading, trailing and doubled separators are ignored, so `/`, `""`
/// and `//` all yield no segments (the root).
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// The `attempt`-th name tried when a relocated folder collides with a
/// sibling: `name`, `name_1`, `name_2`, ...
///
/// The base is shortened so the result stays within
/// [`MAX_FOLDER_NAME_LEN`] characters.
pub fn suffixed_name(name: &str, attempt: u64) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    let suffix = format!("_{attempt}");
    let keep = MAX_FOLDER_NAME_LEN.saturating_sub(suffix.chars().count());
    let base: String = name.chars().take(keep).collect();
    format!("{base}{suffix}")
}
