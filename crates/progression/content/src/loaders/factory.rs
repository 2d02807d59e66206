//! Content factory for building engine configuration from data files.

use std::path::PathBuf;

use progression_core::{GrowthTable, ProgressionConfig};

use crate::loaders::{ConfigLoader, GrowthTableLoader, LoadResult, StarterLoader};
use crate::starters::StarterCatalog;

/// Content factory that loads all progression content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── progression.toml   (required)
/// ├── growth.ron         (optional, overrides [growth] from the TOML)
/// └── starters.ron       (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "progression.toml";
    pub const GROWTH_FILE: &'static str = "growth.ron";
    pub const STARTERS_FILE: &'static str = "starters.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    /// Load the engine configuration, applying `growth.ron` if present.
    pub fn load_config(&self) -> LoadResult<ProgressionConfig> {
        let mut config = ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))?;
        if let Some(growth) = self.load_growth()? {
            config.growth = growth;
        }
        Ok(config)
    }

    /// Load `growth.ron`, or `None` when the file does not exist.
    pub fn load_growth(&self) -> LoadResult<Option<GrowthTable>> {
        let path = self.data_dir.join(Self::GROWTH_FILE);
        if !path.exists() {
            return Ok(None);
        }
        GrowthTableLoader::load(&path).map(Some)
    }

    /// Load `starters.ron`, or an empty catalog when the file does not exist.
    pub fn load_starters(&self) -> LoadResult<StarterCatalog> {
        let path = self.data_dir.join(Self::STARTERS_FILE);
        if !path.exists() {
            return Ok(StarterCatalog::default());
        }
        StarterLoader::load(&path)
    }
}
