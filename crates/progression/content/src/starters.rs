//! Starting attributes offered at character creation.

use progression_core::{CharacterAttributes, CharacterClass};

/// Starting primaries for one class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StarterSpec {
    pub class: CharacterClass,
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub vitality: u32,
}

impl StarterSpec {
    pub fn attributes(&self) -> CharacterAttributes {
        CharacterAttributes::starting(
            self.class,
            self.strength,
            self.agility,
            self.intelligence,
            self.vitality,
        )
    }
}

/// Starting primaries for every selectable class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StarterCatalog {
    pub starters: Vec<StarterSpec>,
}

impl StarterCatalog {
    /// Level 1 attributes for `class`.
    ///
    /// Classes without an entry start with the all-10 default primaries.
    pub fn attributes_for(&self, class: CharacterClass) -> CharacterAttributes {
        self.starters
            .iter()
            .find(|spec| spec.class == class)
            .map(StarterSpec::attributes)
            .unwrap_or_else(|| {
                let mut attrs = CharacterAttributes::default();
                attrs.class = class;
                attrs
            })
    }
}
