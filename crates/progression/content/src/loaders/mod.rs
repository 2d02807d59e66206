//! Content loaders for reading progression data from files.
//!
//! TOML for the engine configuration, RON for tables.

pub mod config;
pub mod factory;
pub mod growth;
pub mod starters;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use growth::GrowthTableLoader;
pub use starters::StarterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
