//! Data-driven progression content and loaders.
//!
//! This crate provides loaders for the files that tune progression:
//! - Progression configuration (TOML)
//! - Class growth table overrides (RON)
//! - Starting attributes per class (RON)
//!
//! Content is consumed when building a [`progression_core::ProgressionEngine`]
//! and never appears in character state.

pub mod starters;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use starters::{StarterCatalog, StarterSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, GrowthTableLoader, StarterLoader};
