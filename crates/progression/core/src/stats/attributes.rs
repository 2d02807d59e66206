//! Character attributes - the stored half of the stat system.
//!
//! Class, level, experience and the four primary stats are the only values
//! that survive a save. Everything in [`super::DerivedStats`] is a function
//! of these.

/// Character class. Selects the per-level growth row in a
/// [`super::GrowthTable`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterClass {
    /// Melee bruiser, strength focused
    #[default]
    Warrior,
    /// Caster, intelligence focused
    Mage,
    /// Ranged, agility focused
    Archer,
    /// Skirmisher, agility and strength
    Rogue,
}

/// Primary attributes of one character.
///
/// Owned by the caller and treated as immutable for the duration of a call;
/// [`crate::ProgressionEngine::add_experience`] is the only engine operation
/// that writes to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterAttributes {
    pub class: CharacterClass,
    /// Always at least 1.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u64,
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub vitality: u32,
}

impl CharacterAttributes {
    pub const MIN_LEVEL: u32 = 1;

    /// Create attributes; a level of 0 is raised to [`Self::MIN_LEVEL`].
    pub fn new(
        class: CharacterClass,
        level: u32,
        experience: u64,
        strength: u32,
        agility: u32,
        intelligence: u32,
        vitality: u32,
    ) -> Self {
        Self {
            class,
            level: level.max(Self::MIN_LEVEL),
            experience,
            strength,
            agility,
            intelligence,
            vitality,
        }
    }

    /// Fresh level 1 character with the given primaries and no experience.
    pub fn starting(
        class: CharacterClass,
        strength: u32,
        agility: u32,
        intelligence: u32,
        vitality: u32,
    ) -> Self {
        Self::new(
            class,
            Self::MIN_LEVEL,
            0,
            strength,
            agility,
            intelligence,
            vitality,
        )
    }

    /// Build attributes from untrusted signed values (e.g. a storage row).
    ///
    /// Negative stats and experience become 0, level is raised to at least 1.
    pub fn from_raw(
        class: CharacterClass,
        level: i64,
        experience: i64,
        strength: i64,
        agility: i64,
        intelligence: i64,
        vitality: i64,
    ) -> Self {
        Self::new(
            class,
            clamp_u32(level),
            experience.max(0) as u64,
            clamp_u32(strength),
            clamp_u32(agility),
            clamp_u32(intelligence),
            clamp_u32(vitality),
        )
    }
}

impl Default for CharacterAttributes {
    /// Level 1 warrior with all primaries at 10.
    fn default() -> Self {
        Self::starting(CharacterClass::Warrior, 10, 10, 10, 10)
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn from_raw_clamps_negative_values() {
        let attrs = CharacterAttributes::from_raw(CharacterClass::Mage, -3, -50, -1, 4, -9, 12);
        assert_eq!(attrs.level, 1);
        assert_eq!(attrs.experience, 0);
        assert_eq!(attrs.strength, 0);
        assert_eq!(attrs.agility, 4);
        assert_eq!(attrs.intelligence, 0);
        assert_eq!(attrs.vitality, 12);
    }

    #[test]
    fn level_zero_is_raised_to_one() {
        let attrs = CharacterAttributes::new(CharacterClass::Rogue, 0, 0, 1, 1, 1, 1);
        assert_eq!(attrs.level, 1);
    }

    #[test]
    fn class_parses_case_insensitively() {
        assert_eq!(
            CharacterClass::from_str("ARCHER").unwrap(),
            CharacterClass::Archer
        );
        assert_eq!(CharacterClass::Rogue.to_string(), "rogue");
    }
}
