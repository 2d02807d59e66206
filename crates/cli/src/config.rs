//! Demo session configuration.
use std::env;
use std::path::PathBuf;

use progression_core::CharacterClass;

/// Settings for the scripted demo session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Content directory; the bundled data is used when unset.
    pub content_dir: Option<PathBuf>,
    pub name: String,
    pub class: CharacterClass,
    /// Experience granted at the start of the session.
    pub experience: i64,
}

impl CliConfig {
    /// Construct demo configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PROGRESSION_CONTENT_DIR` - Directory holding `progression.toml`
    /// - `PROGRESSION_NAME` - Character name (default: "Wanderer")
    /// - `PROGRESSION_CLASS` - `warrior`, `mage`, `archer` or `rogue` (default: warrior)
    /// - `PROGRESSION_EXPERIENCE` - Opening experience grant (default: 250)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("PROGRESSION_CONTENT_DIR") {
            config.content_dir = Some(dir);
        }
        if let Ok(name) = env::var("PROGRESSION_NAME")
            && !name.trim().is_empty()
        {
            config.name = name;
        }
        if let Some(class) = read_env("PROGRESSION_CLASS") {
            config.class = class;
        }
        if let Some(experience) = read_env("PROGRESSION_EXPERIENCE") {
            config.experience = experience;
        }

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            name: "Wanderer".to_owned(),
            class: CharacterClass::Warrior,
            experience: 250,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
