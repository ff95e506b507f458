//! Repository implementations for folders and spells.

pub mod folder;
pub mod spell;

pub use folder::FolderRepository;
pub use spell::SpellRepository;
