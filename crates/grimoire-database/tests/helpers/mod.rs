//! Shared test helpers for repository integration tests.

#![allow(dead_code)]

use grimoire_core::types::FolderId;
use grimoire_database::DatabasePool;
use grimoire_database::migration::run_migrations;
use grimoire_database::repositories::{FolderRepository, SpellRepository};
use grimoire_entity::folder::{CreateFolder, Folder};
use grimoire_entity::spell::{CreateSpell, Spell};

/// An isolated, migrated in-memory store.
pub struct TestStore {
    /// Pool backing both repositories.
    pub db: DatabasePool,
    /// The folder repository under test.
    pub folders: FolderRepository,
    /// The spell collaborator.
    pub spells: SpellRepository,
}

impl TestStore {
    /// Open a fresh in-memory database with the schema applied.
    pub async fn new() -> Self {
        let db = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");

        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let folders = FolderRepository::new(db.pool().clone());
        let spells = SpellRepository::new(db.pool().clone());

        Self {
            db,
            folders,
            spells,
        }
    }

    /// Create a folder, panicking on failure.
    pub async fn folder(&self, parent: FolderId, name: &str) -> Folder {
        self.folders
            .create(&CreateFolder::new(parent, name))
            .await
            .unwrap_or_else(|e| panic!("Failed to create folder '{name}': {e}"))
    }

    /// File a spell, panicking on failure.
    pub async fn spell(&self, folder: FolderId, name: &str) -> Spell {
        self.spells
            .create(&CreateSpell::new(folder, name))
            .await
            .unwrap_or_else(|e| panic!("Failed to create spell '{name}': {e}"))
    }

    /// Every spell must reference an existing folder.
    pub async fn assert_no_orphaned_spells(&self) {
        for spell in self.spells.find_all().await.expect("Failed to list spells") {
            let folder = self
                .folders
                .find_by_id(spell.folder_id)
                .await
                .expect("Failed to look up folder");
            assert!(
                folder.is_some(),
                "spell {} references missing folder {}",
                spell.id,
                spell.folder_id
            );
        }
    }

    /// Names of the direct children of a folder.
    pub async fn child_names(&self, id: FolderId) -> Vec<String> {
        self.folders
            .find_children(id)
            .await
            .expect("Failed to list children")
            .into_iter()
            .map(|folder| folder.name)
            .collect()
    }
}
