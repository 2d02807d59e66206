//! Starting attributes loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::starters::StarterCatalog;

/// Loader for the per-class starter catalog from RON files.
pub struct StarterLoader;

impl StarterLoader {
    pub fn load(path: &Path) -> LoadResult<StarterCatalog> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse starter catalog RON: {}", e))
    }
}
