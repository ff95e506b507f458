//! Database migration command.

use grimoire_core::error::AppError;
use grimoire_database::DatabasePool;
use grimoire_database::repositories::FolderRepository;

use crate::output;

/// Execute the migrate command
///
/// Migrations have already been applied when the pool was opened; this
/// verifies the schema by resolving the root folder.
pub async fn execute(db: &DatabasePool) -> Result<(), AppError> {
    let root = FolderRepository::new(db.pool().clone()).find_root().await?;
    output::print_success(&format!(
        "Database schema is up to date (root folder id: {})",
        root.id
    ));
    Ok(())
}
