//! Spell entity model.
//!
//! Only the columns the folder store touches are modelled here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use grimoire_core::types::{FolderId, SpellId};

/// A spell filed in a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Spell {
    /// Unique spell identifier.
    pub id: SpellId,
    /// The folder the spell is filed in. Always references an existing folder.
    pub folder_id: FolderId,
    /// Spell name.
    pub name: String,
    /// When the spell was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new spell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpell {
    /// Target folder.
    pub folder_id: FolderId,
    /// Spell name.
    pub name: String,
}

impl CreateSpell {
    /// Build a create request for a spell named `name` in `folder_id`.
    pub fn new(folder_id: FolderId, name: impl Into<String>) -> Self {
        Self {
            folder_id,
            name: name.into(),
        }
    }
}
