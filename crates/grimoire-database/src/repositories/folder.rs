//! Folder repository implementation.
//!
//! The folder tree is stored as an adjacency list (`parent_id`). Paths are
//! never materialized; they are derived by walking ancestor links. Closures
//! over descendants use recursive CTEs, so aggregate queries cost one
//! round trip regardless of tree depth and O(subtree) work in the store.
//!
//! Every operation touching more than one row runs in a single
//! transaction. Dropping an uncommitted transaction rolls it back, so any
//! `?` exit leaves the tree untouched.

use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use grimoire_core::error::{AppError, ErrorKind};
use grimoire_core::result::AppResult;
use grimoire_core::types::FolderId;
use grimoire_entity::folder::model::{
    join_path, render_path, split_path, suffixed_name, validate_name,
};
use grimoire_entity::folder::{
    CreateFolder, DeletionSummary, Folder, FolderContents, FolderTree, FolderWithPath,
    RelocationSummary, RenamedFolder,
};

use super::spell::SpellRepository;

/// Deepest level a folder may sit at below the root (which is level 0).
///
/// Writes never build a deeper chain, so an ancestor walk that does not
/// reach the root within this bound means the tree is corrupt.
pub const MAX_FOLDER_DEPTH: i64 = 1024;

const FOLDER_COLUMNS: &str = "id, parent_id, name, created_at";

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ── Lookups ──────────────────────────────────────────────────

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let mut conn = self.acquire().await?;
        Self::fetch_by_id(&mut conn, id).await
    }

    /// Find the root folder.
    pub async fn find_root(&self) -> AppResult<Folder> {
        let mut conn = self.acquire().await?;
        Self::fetch_root(&mut conn)
            .await?
            .ok_or_else(|| AppError::not_found("Root folder not found"))
    }

    /// Resolve a `/`-separated path by walking down from the root.
    ///
    /// Returns `None` as soon as one segment has no matching child.
    pub async fn find_by_path(&self, path: &str) -> AppResult<Option<Folder>> {
        let mut conn = self.acquire().await?;

        let Some(mut current) = Self::fetch_root(&mut conn).await? else {
            return Ok(None);
        };

        for segment in split_path(path) {
            match Self::fetch_child_by_name(&mut conn, current.id, segment).await? {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }

        Ok(Some(current))
    }

    /// List direct children of a folder, ordered by name.
    pub async fn find_children(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        let mut conn = self.acquire().await?;
        Self::require(&mut conn, id).await?;
        Self::fetch_children(&mut conn, id).await
    }

    /// Load every folder and assemble the complete tree.
    pub async fn find_all(&self) -> AppResult<FolderTree> {
        let mut tx = self.begin().await?;

        let folders = sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders ORDER BY name ASC, id ASC"
        ))
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))?;

        let spell_counts = SpellRepository::counts_by_folder_with(&mut tx).await?;
        Self::commit(tx).await?;

        let tree = FolderTree::build(folders, &spell_counts)?;
        if !tree.unreachable.is_empty() {
            warn!(
                unreachable = ?tree.unreachable,
                "Folders not reachable from the root were left out of the tree"
            );
        }

        Ok(tree)
    }

    /// Check whether a folder exists.
    pub async fn exists(&self, id: FolderId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM folders WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check folder", e))
    }

    /// Compute the path of a folder (`/` for the root).
    pub async fn get_path(&self, id: FolderId) -> AppResult<String> {
        let mut conn = self.acquire().await?;
        Self::path_of(&mut conn, id).await
    }

    /// Get the ancestor chain from the root down to the folder itself.
    pub async fn find_ancestors(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        let mut conn = self.acquire().await?;
        Self::fetch_ancestors(&mut conn, id).await
    }

    /// Recursive query to get the ids of all descendants of a folder.
    pub async fn find_descendant_ids(&self, id: FolderId) -> AppResult<Vec<FolderId>> {
        let mut conn = self.acquire().await?;
        Self::require(&mut conn, id).await?;
        Self::fetch_descendant_ids(&mut conn, id).await
    }

    // ── Containment ──────────────────────────────────────────────

    /// Whether any spell is filed directly in the folder.
    pub async fn has_spells(&self, id: FolderId) -> AppResult<bool> {
        let mut conn = self.acquire().await?;
        Self::require(&mut conn, id).await?;
        Ok(SpellRepository::count_in_folder_with(&mut conn, id).await? > 0)
    }

    /// Whether the folder has any direct child folder.
    pub async fn has_subfolders(&self, id: FolderId) -> AppResult<bool> {
        let mut conn = self.acquire().await?;
        Self::require(&mut conn, id).await?;
        Ok(Self::count_children(&mut conn, id).await? > 0)
    }

    /// Whether the folder holds neither spells nor subfolders.
    pub async fn is_empty(&self, id: FolderId) -> AppResult<bool> {
        let mut conn = self.acquire().await?;
        Self::require(&mut conn, id).await?;
        let spells = SpellRepository::count_in_folder_with(&mut conn, id).await?;
        let children = Self::count_children(&mut conn, id).await?;
        Ok(spells == 0 && children == 0)
    }

    /// Summarize what a folder contains, directly and across its subtree.
    pub async fn get_folder_contents(&self, id: FolderId) -> AppResult<FolderContents> {
        let mut tx = self.begin().await?;

        let folder = Self::require(&mut tx, id).await?;
        let path = Self::path_of(&mut tx, id).await?;

        let spell_count = SpellRepository::count_in_folder_with(&mut tx, id).await?;
        let subfolders: Vec<FolderWithPath> = Self::fetch_children(&mut tx, id)
            .await?
            .into_iter()
            .map(|child| {
                let child_path = join_path(&path, &child.name);
                FolderWithPath {
                    folder: child,
                    path: child_path,
                }
            })
            .collect();

        let mut subtree = Self::fetch_descendant_ids(&mut tx, id).await?;
        let total_subfolders_recursive = subtree.len() as u64;
        subtree.push(id);
        let total_spells_recursive =
            SpellRepository::count_in_folders_with(&mut tx, &subtree).await?;

        Self::commit(tx).await?;

        Ok(FolderContents {
            folder: FolderWithPath { folder, path },
            spell_count,
            subfolder_count: subfolders.len() as u64,
            subfolders,
            total_spells_recursive,
            total_subfolders_recursive,
        })
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Create a new folder under an existing parent.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let name = validate_name(&data.name)?;
        let mut tx = self.begin().await?;

        Self::fetch_by_id(&mut tx, data.parent_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Parent folder {} not found", data.parent_id))
            })?;
        if Self::depth_of(&mut tx, data.parent_id).await? >= MAX_FOLDER_DEPTH {
            return Err(AppError::invalid_operation(format!(
                "Folder {} is already {MAX_FOLDER_DEPTH} levels deep",
                data.parent_id
            )));
        }
        Self::ensure_name_available(&mut tx, data.parent_id, name, None).await?;

        let folder = sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO folders (parent_id, name, created_at) VALUES (?1, ?2, ?3) \
             RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(data.parent_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, data.parent_id, name, "Failed to create folder"))?;

        Self::commit(tx).await?;

        info!(
            folder_id = %folder.id,
            parent_id = %data.parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Rename a folder, keeping it under its current parent.
    pub async fn rename(&self, id: FolderId, new_name: &str) -> AppResult<Folder> {
        let name = validate_name(new_name)?;
        let mut tx = self.begin().await?;

        let folder = Self::require(&mut tx, id).await?;
        let Some(parent_id) = folder.parent_id else {
            return Err(AppError::invalid_operation("The root folder cannot be renamed"));
        };
        if folder.name == name {
            return Ok(folder);
        }

        Self::ensure_name_available(&mut tx, parent_id, name, Some(id)).await?;

        let renamed = sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET name = ?2 WHERE id = ?1 RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, parent_id, name, "Failed to rename folder"))?;

        Self::commit(tx).await?;

        info!(
            folder_id = %id,
            old_name = %folder.name,
            new_name = %renamed.name,
            "Folder renamed"
        );

        Ok(renamed)
    }

    /// Move a folder under a new parent.
    ///
    /// Rejects moving the root, moving a folder into itself or into any
    /// of its descendants, moving a subtree so its deepest folder would
    /// end up below [`MAX_FOLDER_DEPTH`], and moving onto a parent that
    /// already has a child of the same name.
    pub async fn move_folder(&self, id: FolderId, new_parent_id: FolderId) -> AppResult<Folder> {
        let mut tx = self.begin().await?;

        let folder = Self::require(&mut tx, id).await?;
        if folder.is_root() {
            return Err(AppError::invalid_operation("The root folder cannot be moved"));
        }
        Self::fetch_by_id(&mut tx, new_parent_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Target folder {new_parent_id} not found"))
            })?;

        if folder.parent_id == Some(new_parent_id) {
            return Ok(folder);
        }
        if new_parent_id == id {
            return Err(AppError::invalid_operation(format!(
                "Cannot move folder {id} into itself"
            )));
        }

        let target_ancestors = Self::fetch_ancestors(&mut tx, new_parent_id).await?;
        if target_ancestors.iter().any(|ancestor| ancestor.id == id) {
            return Err(AppError::invalid_operation(format!(
                "Cannot move folder {id} into its own descendant {new_parent_id}"
            )));
        }

        let target_depth = target_ancestors.len() as i64 - 1;
        let height = Self::fetch_subtree_height(&mut tx, id).await?;
        if target_depth + 1 + height > MAX_FOLDER_DEPTH {
            return Err(AppError::invalid_operation(format!(
                "Moving folder {id} under {new_parent_id} would nest folders deeper than {MAX_FOLDER_DEPTH} levels"
            )));
        }

        Self::ensure_name_available(&mut tx, new_parent_id, &folder.name, Some(id)).await?;

        let moved = sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET parent_id = ?2 WHERE id = ?1 RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(id)
        .bind(new_parent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, new_parent_id, &folder.name, "Failed to move folder"))?;

        Self::commit(tx).await?;

        info!(
            folder_id = %id,
            old_parent = ?folder.parent_id,
            new_parent = %new_parent_id,
            "Folder moved"
        );

        Ok(moved)
    }

    /// Delete a folder, every folder below it and every spell filed in
    /// that subtree.
    pub async fn delete_recursive(&self, id: FolderId) -> AppResult<DeletionSummary> {
        let mut tx = self.begin().await?;

        let folder = Self::require(&mut tx, id).await?;
        if folder.is_root() {
            return Err(AppError::invalid_operation("The root folder cannot be deleted"));
        }

        let mut subtree = vec![id];
        subtree.extend(Self::fetch_descendant_ids(&mut tx, id).await?);

        let spells_deleted = SpellRepository::delete_in_folders_with(&mut tx, &subtree).await?;

        let result = sqlx::query(
            "WITH RECURSIVE subtree(id) AS ( \
                SELECT ?1 \
                UNION \
                SELECT f.id FROM folders f INNER JOIN subtree s ON f.parent_id = s.id \
             ) DELETE FROM folders WHERE id IN (SELECT id FROM subtree)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folders", e))?;

        let folders_deleted = result.rows_affected();
        if folders_deleted != subtree.len() as u64 {
            return Err(AppError::internal(format!(
                "Subtree of folder {id} changed during deletion: expected {} folders, deleted {folders_deleted}",
                subtree.len()
            )));
        }

        Self::commit(tx).await?;

        info!(
            folder_id = %id,
            name = %folder.name,
            folders_deleted,
            spells_deleted,
            "Folder deleted recursively"
        );

        Ok(DeletionSummary {
            folder_id: id,
            folders_deleted,
            spells_deleted,
        })
    }

    /// Delete a folder after hoisting its direct contents into its parent.
    ///
    /// Spells are refiled into the parent. The folder row is removed
    /// before its children are hoisted, with foreign-key checks deferred
    /// to commit, so its own name is free again for them. Direct
    /// subfolders are then reparented, in name order, each taking the
    /// first free name among `name`, `name_1`, `name_2`, ... against the
    /// parent's live children. Deeper levels move along untouched.
    pub async fn move_contents_to_parent(&self, id: FolderId) -> AppResult<RelocationSummary> {
        let mut tx = self.begin().await?;

        let folder = Self::require(&mut tx, id).await?;
        let Some(parent_id) = folder.parent_id else {
            return Err(AppError::invalid_operation(
                "The root folder has no parent to receive its contents",
            ));
        };

        let spells_moved = SpellRepository::reassign_folder_with(&mut tx, id, parent_id).await?;

        let children = Self::fetch_children(&mut tx, id).await?;
        let folders_moved = children.len() as u64;

        // Reset by SQLite when the transaction ends.
        sqlx::query("PRAGMA defer_foreign_keys = ON")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to defer foreign keys", e)
            })?;

        let result = sqlx::query("DELETE FROM folders WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        if result.rows_affected() != 1 {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }

        let mut renamed = Vec::new();

        for child in children {
            let target_name = Self::first_free_name(&mut tx, parent_id, &child.name).await?;

            sqlx::query("UPDATE folders SET parent_id = ?2, name = ?3 WHERE id = ?1")
                .bind(child.id)
                .bind(parent_id)
                .bind(&target_name)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    map_write_error(e, parent_id, &target_name, "Failed to relocate folder")
                })?;

            if target_name != child.name {
                debug!(
                    folder_id = %child.id,
                    from = %child.name,
                    to = %target_name,
                    "Renamed relocated folder to avoid a sibling collision"
                );
                renamed.push(RenamedFolder {
                    id: child.id,
                    from: child.name,
                    to: target_name,
                });
            } else {
                debug!(folder_id = %child.id, parent_id = %parent_id, "Relocated folder");
            }
        }

        Self::commit(tx).await?;

        info!(
            folder_id = %id,
            parent_id = %parent_id,
            spells_moved,
            folders_moved,
            renamed = renamed.len(),
            "Folder deleted, contents moved to parent"
        );

        Ok(RelocationSummary {
            folder_id: id,
            target_id: parent_id,
            spells_moved,
            folders_moved,
            renamed,
        })
    }

    // ── Connection-scoped helpers ────────────────────────────────

    async fn acquire(&self) -> AppResult<sqlx::pool::PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
        })
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    async fn fetch_by_id(conn: &mut SqliteConnection, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn require(conn: &mut SqliteConnection, id: FolderId) -> AppResult<Folder> {
        Self::fetch_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn fetch_root(conn: &mut SqliteConnection) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE parent_id IS NULL"
        ))
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root folder", e))
    }

    async fn fetch_child_by_name(
        conn: &mut SqliteConnection,
        parent_id: FolderId,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE parent_id = ?1 AND name = ?2"
        ))
        .bind(parent_id)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find child folder", e))
    }

    async fn fetch_children(conn: &mut SqliteConnection, id: FolderId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE parent_id = ?1 ORDER BY name ASC, id ASC"
        ))
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn count_children(conn: &mut SqliteConnection, id: FolderId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE parent_id = ?1")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count children", e)
            })?;
        Ok(count as u64)
    }

    /// Ancestor chain ordered root first, ending with the folder itself.
    async fn fetch_ancestors(conn: &mut SqliteConnection, id: FolderId) -> AppResult<Vec<Folder>> {
        let chain = sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE ancestors(id, parent_id, name, created_at, depth) AS ( \
                SELECT id, parent_id, name, created_at, 0 FROM folders WHERE id = ?1 \
                UNION ALL \
                SELECT f.id, f.parent_id, f.name, f.created_at, a.depth + 1 \
                FROM folders f INNER JOIN ancestors a ON f.id = a.parent_id \
                WHERE a.depth < ?2 \
             ) SELECT id, parent_id, name, created_at FROM ancestors ORDER BY depth DESC",
        )
        .bind(id)
        .bind(MAX_FOLDER_DEPTH)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))?;

        match chain.first() {
            None => Err(AppError::not_found(format!("Folder {id} not found"))),
            Some(top) if !top.is_root() => Err(AppError::internal(format!(
                "Ancestor chain of folder {id} does not reach the root within {MAX_FOLDER_DEPTH} levels"
            ))),
            Some(_) => Ok(chain),
        }
    }

    async fn depth_of(conn: &mut SqliteConnection, id: FolderId) -> AppResult<i64> {
        Ok(Self::fetch_ancestors(conn, id).await?.len() as i64 - 1)
    }

    async fn path_of(conn: &mut SqliteConnection, id: FolderId) -> AppResult<String> {
        let chain = Self::fetch_ancestors(conn, id).await?;
        Ok(render_path(
            chain.iter().skip(1).map(|folder| folder.name.as_str()),
        ))
    }

    /// Transitive closure of descendants, the folder itself excluded.
    async fn fetch_descendant_ids(
        conn: &mut SqliteConnection,
        id: FolderId,
    ) -> AppResult<Vec<FolderId>> {
        sqlx::query_scalar::<_, FolderId>(
            "WITH RECURSIVE subtree(id) AS ( \
                SELECT id FROM folders WHERE parent_id = ?1 \
                UNION \
                SELECT f.id FROM folders f INNER JOIN subtree s ON f.parent_id = s.id \
             ) SELECT id FROM subtree",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    /// Levels between a folder and its deepest descendant (0 for a leaf).
    async fn fetch_subtree_height(conn: &mut SqliteConnection, id: FolderId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "WITH RECURSIVE subtree(id, depth) AS ( \
                SELECT ?1, 0 \
                UNION \
                SELECT f.id, s.depth + 1 FROM folders f INNER JOIN subtree s ON f.parent_id = s.id \
                WHERE s.depth < ?2 \
             ) SELECT COALESCE(MAX(depth), 0) FROM subtree",
        )
        .bind(id)
        .bind(MAX_FOLDER_DEPTH)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to measure subtree", e))
    }

    /// Fail with `Conflict` if `parent_id` already has a child named `name`
    /// other than `except`.
    async fn ensure_name_available(
        conn: &mut SqliteConnection,
        parent_id: FolderId,
        name: &str,
        except: Option<FolderId>,
    ) -> AppResult<()> {
        match Self::fetch_child_by_name(conn, parent_id, name).await? {
            Some(existing) if Some(existing.id) != except => Err(conflict(parent_id, name)),
            _ => Ok(()),
        }
    }

    async fn first_free_name(
        conn: &mut SqliteConnection,
        parent_id: FolderId,
        name: &str,
    ) -> AppResult<String> {
        let mut attempt = 0;
        loop {
            let candidate = suffixed_name(name, attempt);
            if Self::fetch_child_by_name(conn, parent_id, &candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }
}

fn conflict(parent_id: FolderId, name: &str) -> AppError {
    AppError::conflict(format!(
        "A folder named '{name}' already exists in folder {parent_id}"
    ))
}

/// Classify a failed folder write, turning sibling-name violations into
/// `Conflict`.
fn map_write_error(e: sqlx::Error, parent_id: FolderId, name: &str, context: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            conflict(parent_id, name)
        }
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::not_found(format!("Folder {parent_id} not found"))
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), e),
    }
}
