//! # grimoire-database
//!
//! SQLite connection management, embedded migrations and the concrete
//! repositories for folders and spells.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{FolderRepository, SpellRepository};
