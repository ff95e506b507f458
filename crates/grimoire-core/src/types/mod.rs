//! Core type definitions used across the grimoire workspace.

pub mod id;

pub use id::*;
