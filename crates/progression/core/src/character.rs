//! In-play character aggregate and its persistence payload.

use crate::state::{RuntimeState, experience_fraction};
use crate::stats::{CharacterAttributes, CharacterClass, DerivedStats};

/// A character in active play: stored attributes plus runtime state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    pub attributes: CharacterAttributes,
    pub state: RuntimeState,
}

impl Character {
    /// Progress toward the next level, in `[0, 1)`.
    pub fn experience_fraction(&self, derived: &DerivedStats) -> f32 {
        experience_fraction(self.attributes.experience, derived)
    }
}

/// Shape of the payload a storage collaborator persists after a mutating
/// call. No wire or file format is implied.
///
/// Numeric fields are signed so that rows written by other tools can be
/// loaded; negative values are clamped to 0 (level to 1) on load.
/// `max_health` / `max_mana` are written for display by other services and
/// ignored on load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub name: String,
    pub class: CharacterClass,
    pub level: i64,
    pub experience: i64,
    pub max_health: i64,
    pub max_mana: i64,
    pub strength: i64,
    pub agility: i64,
    pub intelligence: i64,
    pub vitality: i64,
}

impl CharacterRecord {
    /// Snapshot `attrs` (and the maximums derived from them).
    pub fn capture(name: &str, attrs: &CharacterAttributes, derived: &DerivedStats) -> Self {
        Self {
            name: name.to_owned(),
            class: attrs.class,
            level: i64::from(attrs.level),
            experience: i64::try_from(attrs.experience).unwrap_or(i64::MAX),
            max_health: i64::from(derived.max_health),
            max_mana: i64::from(derived.max_mana),
            strength: i64::from(attrs.strength),
            agility: i64::from(attrs.agility),
            intelligence: i64::from(attrs.intelligence),
            vitality: i64::from(attrs.vitality),
        }
    }

    /// Attributes described by this record, clamped into valid ranges.
    pub fn attributes(&self) -> CharacterAttributes {
        CharacterAttributes::from_raw(
            self.class,
            self.level,
            self.experience,
            self.strength,
            self.agility,
            self.intelligence,
            self.vitality,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProgressionEngine;

    fn record() -> CharacterRecord {
        CharacterRecord {
            name: "Aldric".into(),
            class: CharacterClass::Archer,
            level: 4,
            experience: 30,
            max_health: 9_999,
            max_mana: 9_999,
            strength: 16,
            agility: 19,
            intelligence: 13,
            vitality: 16,
        }
    }

    #[test]
    fn load_recomputes_maximums_and_fills_resources() {
        let engine = ProgressionEngine::default();
        let character = engine.load_character(&record());
        let derived = engine.derive(&character.attributes);

        assert_eq!(character.name, "Aldric");
        assert_eq!(character.attributes.level, 4);
        assert_eq!(derived.max_health, 100 + 160 + 20);
        assert_eq!(character.state.current_health(), derived.max_health);
        assert_eq!(character.state.current_mana(), derived.max_mana);
    }

    #[test]
    fn save_writes_derived_maximums() {
        let engine = ProgressionEngine::default();
        let mut character = engine.load_character(&record());
        engine.add_experience(&mut character.attributes, &mut character.state, 530);

        let saved = engine.save_character(&character);
        let derived = engine.derive(&character.attributes);
        assert_eq!(saved.level, 5);
        assert_eq!(saved.max_health, i64::from(derived.max_health));
        assert_eq!(saved.max_mana, i64::from(derived.max_mana));
        assert_eq!(saved.attributes(), character.attributes);
    }

    #[test]
    fn corrupt_record_is_clamped() {
        let mut record = record();
        record.level = 0;
        record.strength = -20;
        record.experience = -1;

        let attrs = record.attributes();
        assert_eq!(attrs.level, 1);
        assert_eq!(attrs.strength, 0);
        assert_eq!(attrs.experience, 0);
    }

    #[test]
    fn experience_fraction_tracks_progress() {
        let engine = ProgressionEngine::default();
        let character = engine.load_character(&record());
        let derived = engine.derive(&character.attributes);
        // level 4 needs 560
        assert!((character.experience_fraction(&derived) - 30.0 / 560.0).abs() < 1e-6);
    }
}
