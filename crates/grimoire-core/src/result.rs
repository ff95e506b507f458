//! Convenience result type alias for the grimoire workspace.

use crate::error::AppError;

/// A specialized `Result` type for grimoire operations.
pub type AppResult<T> = Result<T, AppError>;
