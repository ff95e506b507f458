//! # grimoire-entity
//!
//! Domain entity models for the grimoire folder store. Every struct in
//! this crate represents a database table row or a value object returned
//! to callers. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and database rows additionally derive `sqlx::FromRow`.

pub mod folder;
pub mod spell;
