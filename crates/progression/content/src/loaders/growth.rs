//! Class growth table loader.

use std::path::Path;

use progression_core::GrowthTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for class growth tables from RON files.
///
/// ```ron
/// (
///     warrior: (strength: 3, agility: 1, intelligence: 1, vitality: 2),
///     mage: (strength: 1, agility: 1, intelligence: 3, vitality: 2),
/// )
/// ```
///
/// Classes left out keep their default rows.
pub struct GrowthTableLoader;

impl GrowthTableLoader {
    pub fn load(path: &Path) -> LoadResult<GrowthTable> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse growth table RON: {}", e))
    }
}
