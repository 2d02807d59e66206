//! Per-level stat growth by class.

use super::attributes::{CharacterAttributes, CharacterClass};

/// Primary stat increase granted for one level gained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatGrowth {
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub vitality: u32,
}

impl StatGrowth {
    pub const fn new(strength: u32, agility: u32, intelligence: u32, vitality: u32) -> Self {
        Self {
            strength,
            agility,
            intelligence,
            vitality,
        }
    }

    /// Add this growth to the primaries of `attrs`.
    pub fn apply_to(&self, attrs: &mut CharacterAttributes) {
        attrs.strength = attrs.strength.saturating_add(self.strength);
        attrs.agility = attrs.agility.saturating_add(self.agility);
        attrs.intelligence = attrs.intelligence.saturating_add(self.intelligence);
        attrs.vitality = attrs.vitality.saturating_add(self.vitality);
    }
}

/// Growth row for every class.
///
/// Data, not branching: content files may override any row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthTable {
    pub warrior: StatGrowth,
    pub mage: StatGrowth,
    pub archer: StatGrowth,
    pub rogue: StatGrowth,
}

impl GrowthTable {
    pub const WARRIOR: StatGrowth = StatGrowth::new(3, 1, 1, 2);
    pub const MAGE: StatGrowth = StatGrowth::new(1, 1, 3, 2);
    pub const ARCHER: StatGrowth = StatGrowth::new(2, 3, 1, 2);
    pub const ROGUE: StatGrowth = StatGrowth::new(2, 2, 1, 2);

    /// Growth row for `class`.
    pub fn get(&self, class: CharacterClass) -> StatGrowth {
        match class {
            CharacterClass::Warrior => self.warrior,
            CharacterClass::Mage => self.mage,
            CharacterClass::Archer => self.archer,
            CharacterClass::Rogue => self.rogue,
        }
    }

    /// Replace the growth row for `class` (builder pattern).
    #[must_use]
    pub fn with(mut self, class: CharacterClass, growth: StatGrowth) -> Self {
        match class {
            CharacterClass::Warrior => self.warrior = growth,
            CharacterClass::Mage => self.mage = growth,
            CharacterClass::Archer => self.archer = growth,
            CharacterClass::Rogue => self.rogue = growth,
        }
        self
    }
}

impl Default for GrowthTable {
    fn default() -> Self {
        Self {
            warrior: Self::WARRIOR,
            mage: Self::MAGE,
            archer: Self::ARCHER,
            rogue: Self::ROGUE,
        }
    }
}
