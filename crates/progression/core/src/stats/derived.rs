//! Derived Stats - combat and resource values computed from attributes.
//!
//! These are NOT stored - always recomputed from [`CharacterAttributes`].
//!
//! Formulas:
//! - Health_max = 100 + VIT × 10 + Level × 5
//! - Mana_max = 50 + INT × 5 + Level × 2
//! - Attack = STR + Level × 2
//! - Defense = VIT + Level
//! - Crit% = base_crit + AGI / 2
//! - XP to next = Level × 100 + Level² × 10

use super::attributes::CharacterAttributes;
use crate::config::ProgressionConfig;

/// Resource pools tracked in [`crate::RuntimeState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Health,
    Mana,
}

/// Combat statistics and resource maximums for one set of attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub max_health: u32,
    pub max_mana: u32,
    /// Base damage dealt by a non-critical hit.
    pub attack_power: u32,
    /// Flat reduction applied to incoming damage.
    pub defense: u32,
    /// Chance of a critical hit, in whole percent. May exceed 100.
    pub critical_chance_percent: u32,
    /// Experience required to advance from the current level.
    pub experience_to_next_level: u64,
}

impl DerivedStats {
    /// Compute derived stats from attributes.
    pub fn compute(attrs: &CharacterAttributes, config: &ProgressionConfig) -> Self {
        let level = attrs.level.max(CharacterAttributes::MIN_LEVEL);

        Self {
            max_health: Self::compute_max_health(attrs.vitality, level),
            max_mana: Self::compute_max_mana(attrs.intelligence, level),
            attack_power: attrs.strength.saturating_add(level.saturating_mul(2)),
            defense: attrs.vitality.saturating_add(level),
            critical_chance_percent: config
                .base_critical_chance_percent
                .saturating_add(attrs.agility / 2),
            experience_to_next_level: Self::experience_to_next_level(level),
        }
    }

    /// Formula: 100 + VIT × 10 + Level × 5
    pub fn compute_max_health(vitality: u32, level: u32) -> u32 {
        100u32
            .saturating_add(vitality.saturating_mul(10))
            .saturating_add(level.saturating_mul(5))
    }

    /// Formula: 50 + INT × 5 + Level × 2
    pub fn compute_max_mana(intelligence: u32, level: u32) -> u32 {
        50u32
            .saturating_add(intelligence.saturating_mul(5))
            .saturating_add(level.saturating_mul(2))
    }

    /// Formula: Level × 100 + Level² × 10
    ///
    /// Saturates at `u64::MAX`, which no stored experience can reach.
    pub fn experience_to_next_level(level: u32) -> u64 {
        let level = u64::from(level.max(CharacterAttributes::MIN_LEVEL));
        level
            .saturating_mul(100)
            .saturating_add(level.saturating_mul(level).saturating_mul(10))
    }

    /// Get the max value for a specific resource.
    pub fn max(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Health => self.max_health,
            ResourceKind::Mana => self.max_mana,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CharacterClass;
    use crate::{CharacterRecord, ProgressionEngine};

    #[test]
    fn default_warrior_matches_formulas() {
        let attrs = CharacterAttributes::default();
        let derived = DerivedStats::compute(&attrs, &ProgressionConfig::default());

        assert_eq!(derived.max_health, 100 + 10 * 10 + 5);
        assert_eq!(derived.max_mana, 50 + 10 * 5 + 2);
        assert_eq!(derived.attack_power, 10 + 2);
        assert_eq!(derived.defense, 10 + 1);
        assert_eq!(derived.critical_chance_percent, 5 + 5);
        assert_eq!(derived.experience_to_next_level, 110);
    }

    #[test]
    fn critical_chance_uses_integer_division() {
        let attrs = CharacterAttributes::starting(CharacterClass::Rogue, 0, 7, 0, 0);
        let derived = DerivedStats::compute(&attrs, &ProgressionConfig::default());
        assert_eq!(derived.critical_chance_percent, 5 + 3);
    }

    #[test]
    fn base_critical_chance_is_configurable() {
        let attrs = CharacterAttributes::starting(CharacterClass::Rogue, 0, 10, 0, 0);
        let config = ProgressionConfig::default().with_base_critical_chance_percent(0);
        let derived = DerivedStats::compute(&attrs, &config);
        assert_eq!(derived.critical_chance_percent, 5);
    }

    #[test]
    fn experience_curve() {
        assert_eq!(DerivedStats::experience_to_next_level(1), 110);
        assert_eq!(DerivedStats::experience_to_next_level(2), 240);
        assert_eq!(DerivedStats::experience_to_next_level(10), 2000);
        // level 0 is treated as level 1
        assert_eq!(DerivedStats::experience_to_next_level(0), 110);
    }

    #[test]
    fn experience_curve_saturates_at_extreme_levels() {
        let engine = ProgressionEngine::default();
        let record = CharacterRecord {
            name: "Ancient".to_owned(),
            class: CharacterClass::Warrior,
            level: 2_000_000_000,
            experience: 0,
            max_health: 0,
            max_mana: 0,
            strength: 10,
            agility: 10,
            intelligence: 10,
            vitality: 10,
        };

        let character = engine.load_character(&record);
        let derived = engine.derive(&character.attributes);
        assert_eq!(character.attributes.level, 2_000_000_000);
        assert_eq!(derived.experience_to_next_level, u64::MAX);
        assert_eq!(
            DerivedStats::experience_to_next_level(1_000_000),
            10_000_100_000_000
        );
        assert_eq!(character.state.current_health(), derived.max_health);
    }

    #[test]
    fn zeroed_attributes_still_have_base_pools() {
        let attrs = CharacterAttributes::starting(CharacterClass::Mage, 0, 0, 0, 0);
        let derived = DerivedStats::compute(&attrs, &ProgressionConfig::default());
        assert_eq!(derived.max_health, 105);
        assert_eq!(derived.max_mana, 52);
        assert_eq!(derived.max(ResourceKind::Health), 105);
        assert_eq!(derived.max(ResourceKind::Mana), 52);
    }
}
