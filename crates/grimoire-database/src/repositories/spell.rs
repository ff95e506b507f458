//! Spell repository implementation.
//!
//! Spell CRUD proper lives elsewhere; this repository provides the reads
//! and folder-column updates the folder store relies on. The `*_with`
//! variants run on a caller-supplied connection so the folder store can
//! compose them into its own transactions.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use grimoire_core::error::{AppError, ErrorKind};
use grimoire_core::result::AppResult;
use grimoire_core::types::{FolderId, SpellId};
use grimoire_entity::spell::{CreateSpell, Spell};

/// Maximum number of folder ids bound into a single `IN (...)` list.
const BIND_CHUNK: usize = 500;

/// Repository for spell rows, as far as folders are concerned.
#[derive(Debug, Clone)]
pub struct SpellRepository {
    pool: SqlitePool,
}

impl SpellRepository {
    /// Create a new spell repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a spell by ID.
    pub async fn find_by_id(&self, id: SpellId) -> AppResult<Option<Spell>> {
        sqlx::query_as::<_, Spell>(
            "SELECT id, folder_id, name, created_at FROM spells WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find spell", e))
    }

    /// List every spell.
    pub async fn find_all(&self) -> AppResult<Vec<Spell>> {
        sqlx::query_as::<_, Spell>(
            "SELECT id, folder_id, name, created_at FROM spells ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list spells", e))
    }

    /// List the spells filed directly in a folder.
    pub async fn find_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<Spell>> {
        sqlx::query_as::<_, Spell>(
            "SELECT id, folder_id, name, created_at FROM spells \
             WHERE folder_id = ?1 ORDER BY name ASC, id ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list spells in folder", e)
        })
    }

    /// File a new spell in an existing folder.
    pub async fn create(&self, data: &CreateSpell) -> AppResult<Spell> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Spell name cannot be empty"));
        }

        sqlx::query_as::<_, Spell>(
            "INSERT INTO spells (folder_id, name, created_at) VALUES (?1, ?2, ?3) \
             RETURNING id, folder_id, name, created_at",
        )
        .bind(data.folder_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Folder {} not found", data.folder_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create spell", e),
        })
    }

    /// Count the spells filed directly in a folder.
    pub async fn count_in_folder(&self, folder_id: FolderId) -> AppResult<u64> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
        })?;
        Self::count_in_folder_with(&mut conn, folder_id).await
    }

    /// Refile every spell in `from` into `to`. Returns the number moved.
    pub async fn reassign_folder(&self, from: FolderId, to: FolderId) -> AppResult<u64> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
        })?;
        Self::reassign_folder_with(&mut conn, from, to).await
    }

    /// Count the spells filed directly in a folder, on the given connection.
    pub async fn count_in_folder_with(
        conn: &mut SqliteConnection,
        folder_id: FolderId,
    ) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM spells WHERE folder_id = ?1")
            .bind(folder_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count spells", e))?;
        Ok(count as u64)
    }

    /// Count the spells filed in any of the given folders.
    pub async fn count_in_folders_with(
        conn: &mut SqliteConnection,
        folder_ids: &[FolderId],
    ) -> AppResult<u64> {
        let mut total = 0u64;
        for chunk in folder_ids.chunks(BIND_CHUNK) {
            let mut query =
                QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM spells WHERE folder_id IN (");
            let mut ids = query.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");

            let count: i64 = query
                .build_query_scalar()
                .fetch_one(&mut *conn)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count spells", e)
                })?;
            total += count as u64;
        }
        Ok(total)
    }

    /// Direct spell counts for every folder that holds at least one spell.
    pub async fn counts_by_folder_with(
        conn: &mut SqliteConnection,
    ) -> AppResult<HashMap<FolderId, u64>> {
        let rows: Vec<(FolderId, i64)> =
            sqlx::query_as("SELECT folder_id, COUNT(*) FROM spells GROUP BY folder_id")
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count spells", e)
                })?;
        Ok(rows
            .into_iter()
            .map(|(folder_id, count)| (folder_id, count as u64))
            .collect())
    }

    /// Refile every spell in `from` into `to`, on the given connection.
    pub async fn reassign_folder_with(
        conn: &mut SqliteConnection,
        from: FolderId,
        to: FolderId,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE spells SET folder_id = ?2 WHERE folder_id = ?1")
            .bind(from)
            .bind(to)
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::not_found(format!("Folder {to} not found"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to reassign spells", e),
            })?;
        Ok(result.rows_affected())
    }

    /// Delete every spell filed in any of the given folders.
    pub async fn delete_in_folders_with(
        conn: &mut SqliteConnection,
        folder_ids: &[FolderId],
    ) -> AppResult<u64> {
        let mut deleted = 0u64;
        for chunk in folder_ids.chunks(BIND_CHUNK) {
            let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM spells WHERE folder_id IN (");
            let mut ids = query.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");

            let result = query.build().execute(&mut *conn).await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete spells", e)
            })?;
            deleted += result.rows_affected();
        }
        Ok(deleted)
    }
}
