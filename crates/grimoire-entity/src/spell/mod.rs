//! Spell domain entities.

pub mod model;

pub use model::{CreateSpell, Spell};
