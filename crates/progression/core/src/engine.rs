//! Progression engine: the only place that mutates [`RuntimeState`].
//!
//! The engine holds configuration only. Attributes and state are passed in
//! explicitly on every call, so one engine serves any number of characters
//! and independent characters can be processed on different threads.
//!
//! Mutating operations return the [`ProgressionEvent`]s they produced, in
//! order. Operations that cannot apply (a grant of zero experience, healing
//! a dead character) return no events rather than failing.

use core::time::Duration;

use crate::character::{Character, CharacterRecord};
use crate::combat::{self, DamageRoll};
use crate::config::{ProgressionConfig, RegenRates};
use crate::error::ProgressionError;
use crate::event::{Events, ProgressionEvent};
use crate::state::{LifeState, RuntimeState};
use crate::stats::{CharacterAttributes, DerivedStats, ResourceKind};

/// Stateless rules engine parameterized by [`ProgressionConfig`].
#[derive(Clone, Debug, Default)]
pub struct ProgressionEngine {
    config: ProgressionConfig,
}

impl ProgressionEngine {
    pub fn new(config: ProgressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Derived stats for `attrs` under this engine's configuration.
    pub fn derive(&self, attrs: &CharacterAttributes) -> DerivedStats {
        DerivedStats::compute(attrs, &self.config)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// State for a character entering play: full health and mana.
    pub fn initialize(&self, attrs: &CharacterAttributes) -> RuntimeState {
        RuntimeState::at_max(&self.derive(attrs))
    }

    /// Recompute derived stats and pull current resources down to any lower
    /// maximum. Never raises current values.
    pub fn recalculate(&self, attrs: &CharacterAttributes, state: &mut RuntimeState) -> DerivedStats {
        let derived = self.derive(attrs);
        state.health = state.health.min(derived.max_health);
        state.mana = state.mana.min(derived.max_mana);
        derived
    }

    /// Build an in-play character from a stored record.
    ///
    /// The record's stored maximums are informational; they are recomputed
    /// from the attributes. The character starts at full resources.
    pub fn load_character(&self, record: &CharacterRecord) -> Character {
        let attributes = record.attributes();
        let state = self.initialize(&attributes);
        Character {
            name: record.name.clone(),
            attributes,
            state,
        }
    }

    /// Persistence payload for `character`.
    pub fn save_character(&self, character: &Character) -> CharacterRecord {
        CharacterRecord::capture(
            &character.name,
            &character.attributes,
            &self.derive(&character.attributes),
        )
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Add `delta` to current health, clamped to `[0, max_health]`.
    ///
    /// Reaching 0 moves the character to [`LifeState::Dead`] and emits
    /// [`ProgressionEvent::Died`]. Characters that are already down ignore
    /// health changes; they come back only through [`Self::respawn`].
    pub fn modify_health(
        &self,
        state: &mut RuntimeState,
        derived: &DerivedStats,
        delta: i64,
    ) -> Events {
        let mut events = Events::new();
        if state.life.is_down() {
            return events;
        }

        Self::modify_resource(state, derived, ResourceKind::Health, delta, &mut events);

        if state.health == 0 {
            state.life = LifeState::Dead;
            state.health_regen.reset();
            state.mana_regen.reset();
            events.push(ProgressionEvent::Died);
        }
        events
    }

    /// Add `delta` to current mana, clamped to `[0, max_mana]`.
    pub fn modify_mana(&self, state: &mut RuntimeState, derived: &DerivedStats, delta: i64) -> Events {
        let mut events = Events::new();
        Self::modify_resource(state, derived, ResourceKind::Mana, delta, &mut events);
        events
    }

    /// Set health to `round(max_health × fraction)`, fraction clamped to `[0, 1]`.
    pub fn set_health_fraction(
        &self,
        state: &mut RuntimeState,
        derived: &DerivedStats,
        fraction: f32,
    ) -> Events {
        let target = Self::fraction_of(derived.max_health, fraction);
        self.modify_health(state, derived, target - i64::from(state.health))
    }

    /// Set mana to `round(max_mana × fraction)`, fraction clamped to `[0, 1]`.
    pub fn set_mana_fraction(
        &self,
        state: &mut RuntimeState,
        derived: &DerivedStats,
        fraction: f32,
    ) -> Events {
        let target = Self::fraction_of(derived.max_mana, fraction);
        self.modify_mana(state, derived, target - i64::from(state.mana))
    }

    /// Deduct `cost` mana, or fail without touching state if there is not
    /// enough.
    pub fn spend_mana(
        &self,
        state: &mut RuntimeState,
        derived: &DerivedStats,
        cost: u32,
    ) -> Result<Events, ProgressionError> {
        if !state.has_mana(cost) {
            return Err(ProgressionError::InsufficientMana {
                required: cost,
                available: state.mana,
            });
        }
        Ok(self.modify_mana(state, derived, -i64::from(cost)))
    }

    fn modify_resource(
        state: &mut RuntimeState,
        derived: &DerivedStats,
        resource: ResourceKind,
        delta: i64,
        events: &mut Events,
    ) {
        let max = derived.max(resource);
        let current = state.current_mut(resource);
        let previous = *current;
        let next = i64::from(previous)
            .saturating_add(delta)
            .clamp(0, i64::from(max)) as u32;

        if next == previous {
            return;
        }
        *current = next;

        events.push(match resource {
            ResourceKind::Health => ProgressionEvent::HealthChanged { current: next, max },
            ResourceKind::Mana => ProgressionEvent::ManaChanged { current: next, max },
        });
    }

    fn fraction_of(max: u32, fraction: f32) -> i64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            f64::from(fraction).clamp(0.0, 1.0)
        };
        (f64::from(max) * fraction).round() as i64
    }

    // ========================================================================
    // Combat
    // ========================================================================

    /// Take a hit of `raw_damage` before defense.
    ///
    /// Actual damage is `max(minimum_damage, raw - defense)`.
    pub fn apply_damage(
        &self,
        state: &mut RuntimeState,
        derived: &DerivedStats,
        raw_damage: u32,
    ) -> Events {
        let actual = combat::mitigate_damage(derived, &self.config, raw_damage);
        self.modify_health(state, derived, -i64::from(actual))
    }

    /// Roll outgoing damage from a caller-supplied uniform draw in `[0, 1)`.
    pub fn roll_damage(&self, derived: &DerivedStats, uniform: f64) -> DamageRoll {
        combat::roll_damage(derived, &self.config, uniform)
    }

    // ========================================================================
    // Experience
    // ========================================================================

    /// Grant experience, levelling up as many times as it pays for.
    ///
    /// Each level is taken one at a time: the threshold for the current
    /// level is subtracted and the class growth row is applied before the
    /// next threshold is checked, so growth compounds per level. Every
    /// level emits [`ProgressionEvent::LeveledUp`]. The resulting stats and
    /// resource restores are reported once, after the last level: mana is
    /// restored fully, and health fully if the character is alive.
    /// Non-positive grants are ignored.
    ///
    /// Cost is linear in the number of levels gained; a grant of `i64::MAX`
    /// from level 1 spans roughly 1.4 million levels.
    pub fn add_experience(
        &self,
        attrs: &mut CharacterAttributes,
        state: &mut RuntimeState,
        amount: i64,
    ) -> Events {
        let mut events = Events::new();
        if amount <= 0 {
            return events;
        }

        attrs.experience = attrs.experience.saturating_add(amount as u64);
        let growth = self.config.growth.get(attrs.class);
        let starting_level = attrs.level;

        loop {
            let needed = DerivedStats::experience_to_next_level(attrs.level);
            if attrs.experience < needed {
                break;
            }
            let Some(next_level) = attrs.level.checked_add(1) else {
                break;
            };

            attrs.experience -= needed;
            attrs.level = next_level;
            growth.apply_to(attrs);
            events.push(ProgressionEvent::LeveledUp { level: next_level });
        }

        if attrs.level != starting_level {
            let derived = self.recalculate(attrs, state);
            events.push(ProgressionEvent::StatsChanged(derived.clone()));

            if state.life.is_alive() {
                state.health = derived.max_health;
                state.health_regen.reset();
                events.push(ProgressionEvent::HealthChanged {
                    current: state.health,
                    max: derived.max_health,
                });
            }
            state.mana = derived.max_mana;
            state.mana_regen.reset();
            events.push(ProgressionEvent::ManaChanged {
                current: state.mana,
                max: derived.max_mana,
            });
        }

        events.push(ProgressionEvent::ExperienceChanged {
            experience: attrs.experience,
            to_next_level: DerivedStats::experience_to_next_level(attrs.level),
        });
        events
    }

    // ========================================================================
    // Regeneration
    // ========================================================================

    /// Advance regeneration by `elapsed` at the configured rates.
    pub fn regen_tick(&self, state: &mut RuntimeState, derived: &DerivedStats, elapsed: Duration) -> Events {
        self.regen_tick_with(state, derived, elapsed, self.config.regen)
    }

    /// Advance regeneration by `elapsed` at explicit rates.
    ///
    /// Each resource banks time independently and gains one point per
    /// `1 / rate` seconds banked. The result depends only on the total
    /// elapsed time, not on how it was split into ticks. Regeneration is
    /// paused while the character is down.
    pub fn regen_tick_with(
        &self,
        state: &mut RuntimeState,
        derived: &DerivedStats,
        elapsed: Duration,
        rates: RegenRates,
    ) -> Events {
        let mut events = Events::new();
        if state.life.is_down() {
            return events;
        }

        for (resource, rate) in [
            (ResourceKind::Health, rates.health_per_second),
            (ResourceKind::Mana, rates.mana_per_second),
        ] {
            let missing = derived
                .max(resource)
                .saturating_sub(state.current(resource));
            let accumulator = match resource {
                ResourceKind::Health => &mut state.health_regen,
                ResourceKind::Mana => &mut state.mana_regen,
            };
            let Some(interval) = RegenRates::interval(rate) else {
                accumulator.reset();
                continue;
            };

            let points = accumulator.accumulate(elapsed, interval, missing);
            if points > 0 {
                Self::modify_resource(state, derived, resource, i64::from(points), &mut events);
            }
        }
        events
    }

    // ========================================================================
    // Death and respawn
    // ========================================================================

    /// Move a dead character to [`LifeState::Respawning`] and return the
    /// configured delay the caller should wait before [`Self::respawn`].
    pub fn begin_respawn(&self, state: &mut RuntimeState) -> Result<Duration, ProgressionError> {
        if state.life != LifeState::Dead {
            return Err(ProgressionError::InvalidLifeState {
                operation: "begin_respawn",
                expected: "dead",
                actual: state.life,
            });
        }
        state.life = LifeState::Respawning;
        Ok(self.config.respawn_delay())
    }

    /// Bring a dead or respawning character back with a fraction of health.
    ///
    /// Health becomes `max_health / respawn_health_divisor` (floor, at least
    /// 1). Mana is left as it was.
    pub fn respawn(&self, state: &mut RuntimeState, derived: &DerivedStats) -> Result<Events, ProgressionError> {
        if !state.life.is_down() {
            return Err(ProgressionError::InvalidLifeState {
                operation: "respawn",
                expected: "dead",
                actual: state.life,
            });
        }

        let divisor = self.config.respawn_health_divisor.max(1);
        state.health = (derived.max_health / divisor).max(1);
        state.life = LifeState::Alive;
        state.health_regen.reset();

        Ok(vec![ProgressionEvent::HealthChanged {
            current: state.health,
            max: derived.max_health,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{CharacterClass, GrowthTable};

    fn setup() -> (ProgressionEngine, CharacterAttributes, RuntimeState, DerivedStats) {
        let engine = ProgressionEngine::default();
        let attrs = CharacterAttributes::default();
        let state = engine.initialize(&attrs);
        let derived = engine.derive(&attrs);
        (engine, attrs, state, derived)
    }

    fn count_died(events: &Events) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, ProgressionEvent::Died))
            .count()
    }

    #[test]
    fn initialize_fills_resources() {
        let (_, _, state, derived) = setup();
        assert_eq!(derived.max_health, 205);
        assert_eq!(state.current_health(), 205);
        assert_eq!(state.current_mana(), derived.max_mana);
        assert_eq!(state.life(), LifeState::Alive);
    }

    #[test]
    fn recalculate_only_lowers() {
        let (engine, mut attrs, mut state, _) = setup();
        attrs.vitality = 0;
        let derived = engine.recalculate(&attrs, &mut state);
        assert_eq!(derived.max_health, 105);
        assert_eq!(state.current_health(), 105);

        attrs.vitality = 10;
        engine.recalculate(&attrs, &mut state);
        assert_eq!(state.current_health(), 105);

        attrs.intelligence = 0;
        let derived = engine.recalculate(&attrs, &mut state);
        assert_eq!(derived.max_mana, 52);
        assert_eq!(state.current_mana(), 52);

        attrs.intelligence = 10;
        engine.recalculate(&attrs, &mut state);
        assert_eq!(state.current_mana(), 52);
    }

    #[test]
    fn modify_health_emits_change() {
        let (engine, _, mut state, derived) = setup();
        let events = engine.modify_health(&mut state, &derived, -5);
        assert_eq!(
            events,
            vec![ProgressionEvent::HealthChanged { current: 200, max: 205 }]
        );
    }

    #[test]
    fn modify_health_without_change_is_silent() {
        let (engine, _, mut state, derived) = setup();
        assert!(engine.modify_health(&mut state, &derived, 50).is_empty());
        assert!(engine.modify_health(&mut state, &derived, 0).is_empty());
    }

    #[test]
    fn overkill_dies_exactly_once() {
        let (engine, _, mut state, derived) = setup();
        let events = engine.modify_health(&mut state, &derived, -1_000_000);
        assert_eq!(
            events,
            vec![
                ProgressionEvent::HealthChanged { current: 0, max: 205 },
                ProgressionEvent::Died,
            ]
        );
        assert_eq!(state.life(), LifeState::Dead);

        let again = engine.modify_health(&mut state, &derived, -50);
        assert_eq!(count_died(&again), 0);
        assert_eq!(state.current_health(), 0);
    }

    #[test]
    fn healing_does_not_revive() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -1_000);
        assert!(engine.modify_health(&mut state, &derived, 100).is_empty());
        assert_eq!(state.current_health(), 0);
        assert_eq!(state.life(), LifeState::Dead);
    }

    #[test]
    fn mana_clamps_without_death() {
        let (engine, _, mut state, derived) = setup();
        let events = engine.modify_mana(&mut state, &derived, -10_000);
        assert_eq!(
            events,
            vec![ProgressionEvent::ManaChanged { current: 0, max: derived.max_mana }]
        );
        assert_eq!(state.life(), LifeState::Alive);
    }

    #[test]
    fn spend_mana_requires_enough() {
        let (engine, _, mut state, derived) = setup();
        let err = engine
            .spend_mana(&mut state, &derived, derived.max_mana + 1)
            .unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_MANA");
        assert!(err.severity().is_recoverable());
        assert_eq!(state.current_mana(), derived.max_mana);

        engine.spend_mana(&mut state, &derived, 30).unwrap();
        assert_eq!(state.current_mana(), derived.max_mana - 30);
    }

    #[test]
    fn set_fractions() {
        let (engine, _, mut state, derived) = setup();
        engine.set_health_fraction(&mut state, &derived, 0.5);
        assert_eq!(state.current_health(), 103); // round(102.5)
        engine.set_mana_fraction(&mut state, &derived, 2.0);
        assert_eq!(state.current_mana(), derived.max_mana);

        let events = engine.set_health_fraction(&mut state, &derived, 0.0);
        assert_eq!(count_died(&events), 1);
    }

    #[test]
    fn damage_never_below_one() {
        let (engine, _, mut state, mut derived) = setup();
        derived.defense = 10;
        engine.apply_damage(&mut state, &derived, 5);
        assert_eq!(state.current_health(), derived.max_health - 1);
    }

    #[test]
    fn damage_reduced_by_defense() {
        let (engine, _, mut state, derived) = setup();
        // defense 11
        engine.apply_damage(&mut state, &derived, 31);
        assert_eq!(state.current_health(), derived.max_health - 20);
    }

    #[test]
    fn roll_uses_config_multiplier() {
        let (engine, _, _, derived) = setup();
        let roll = engine.roll_damage(&derived, 0.0);
        assert!(roll.critical);
        assert_eq!(roll.amount, 18); // 12 × 1.5
        assert_eq!(engine.roll_damage(&derived, 0.99).amount, 12);
    }

    #[test]
    fn single_level_from_large_grant() {
        let (engine, mut attrs, mut state, _) = setup();
        let events = engine.add_experience(&mut attrs, &mut state, 250);

        // 250 - 110 = 140, level 2 needs 240
        assert_eq!(attrs.level, 2);
        assert_eq!(attrs.experience, 140);
        assert_eq!(attrs.strength, 13);
        assert_eq!(attrs.agility, 11);
        assert_eq!(attrs.intelligence, 11);
        assert_eq!(attrs.vitality, 12);

        let level_ups: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                ProgressionEvent::LeveledUp { level } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(level_ups, vec![2]);
        assert_eq!(
            events.last(),
            Some(&ProgressionEvent::ExperienceChanged {
                experience: 140,
                to_next_level: 240
            })
        );
    }

    #[test]
    fn multi_level_compounds_growth() {
        let (engine, mut attrs, mut state, _) = setup();
        // 110 (1→2) + 240 (2→3) + 5 leftover
        let events = engine.add_experience(&mut attrs, &mut state, 355);

        assert_eq!(attrs.level, 3);
        assert_eq!(attrs.experience, 5);
        assert_eq!(attrs.strength, 16);
        assert_eq!(attrs.vitality, 14);

        let derived = engine.derive(&attrs);
        assert_eq!(state.current_health(), derived.max_health);
        assert_eq!(state.current_mana(), derived.max_mana);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ProgressionEvent::LeveledUp { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn level_up_event_order() {
        let (engine, mut attrs, mut state, _) = setup();
        engine.modify_health(&mut state, &engine.derive(&attrs), -50);
        let events = engine.add_experience(&mut attrs, &mut state, 110);
        let derived = engine.derive(&attrs);

        assert_eq!(
            events,
            vec![
                ProgressionEvent::LeveledUp { level: 2 },
                ProgressionEvent::StatsChanged(derived.clone()),
                ProgressionEvent::HealthChanged {
                    current: derived.max_health,
                    max: derived.max_health
                },
                ProgressionEvent::ManaChanged {
                    current: derived.max_mana,
                    max: derived.max_mana
                },
                ProgressionEvent::ExperienceChanged {
                    experience: 0,
                    to_next_level: 240
                },
            ]
        );
    }

    #[test]
    fn multi_level_grant_reports_final_stats_once() {
        let (engine, mut attrs, mut state, _) = setup();
        let events = engine.add_experience(&mut attrs, &mut state, 355);
        let derived = engine.derive(&attrs);

        assert_eq!(
            events,
            vec![
                ProgressionEvent::LeveledUp { level: 2 },
                ProgressionEvent::LeveledUp { level: 3 },
                ProgressionEvent::StatsChanged(derived.clone()),
                ProgressionEvent::HealthChanged {
                    current: derived.max_health,
                    max: derived.max_health
                },
                ProgressionEvent::ManaChanged {
                    current: derived.max_mana,
                    max: derived.max_mana
                },
                ProgressionEvent::ExperienceChanged {
                    experience: 5,
                    to_next_level: 390
                },
            ]
        );
    }

    #[test]
    fn huge_grant_emits_one_event_per_level_plus_summary() {
        let (engine, mut attrs, mut state, _) = setup();
        let events = engine.add_experience(&mut attrs, &mut state, 10_000_000);
        let levels_gained = (attrs.level - 1) as usize;

        assert!(levels_gained > 100);
        assert_eq!(events.len(), levels_gained + 4);
        assert!(attrs.experience < engine.derive(&attrs).experience_to_next_level);
    }

    #[test]
    fn non_positive_grant_is_noop() {
        let (engine, mut attrs, mut state, _) = setup();
        let before = attrs.clone();
        assert!(engine.add_experience(&mut attrs, &mut state, 0).is_empty());
        assert!(engine.add_experience(&mut attrs, &mut state, -40).is_empty());
        assert_eq!(attrs, before);
    }

    #[test]
    fn class_growth_follows_table() {
        let engine = ProgressionEngine::default();
        let mut attrs = CharacterAttributes::starting(CharacterClass::Mage, 10, 10, 10, 10);
        let mut state = engine.initialize(&attrs);
        engine.add_experience(&mut attrs, &mut state, 110);
        assert_eq!(
            (attrs.strength, attrs.agility, attrs.intelligence, attrs.vitality),
            (11, 11, 13, 12)
        );

        let custom = ProgressionEngine::new(
            ProgressionConfig::default().with_growth(GrowthTable::default().with(
                CharacterClass::Mage,
                crate::stats::StatGrowth::new(0, 0, 10, 0),
            )),
        );
        let mut attrs = CharacterAttributes::starting(CharacterClass::Mage, 10, 10, 10, 10);
        let mut state = custom.initialize(&attrs);
        custom.add_experience(&mut attrs, &mut state, 110);
        assert_eq!(attrs.intelligence, 20);
        assert_eq!(attrs.vitality, 10);
    }

    #[test]
    fn level_up_while_dead_keeps_character_down() {
        let (engine, mut attrs, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -10_000);
        engine.add_experience(&mut attrs, &mut state, 110);
        assert_eq!(attrs.level, 2);
        assert_eq!(state.current_health(), 0);
        assert_eq!(state.life(), LifeState::Dead);
        assert_eq!(state.current_mana(), engine.derive(&attrs).max_mana);
    }

    #[test]
    fn regen_two_seconds_equals_two_ticks() {
        let (engine, _, mut state, derived) = setup();
        let rates = RegenRates::new(1.0, 0.0);
        engine.modify_health(&mut state, &derived, -50);
        engine.regen_tick_with(&mut state, &derived, Duration::from_secs(2), rates);
        let once = state.current_health();

        let (engine, _, mut split, derived) = setup();
        engine.modify_health(&mut split, &derived, -50);
        engine.regen_tick_with(&mut split, &derived, Duration::from_secs(1), rates);
        engine.regen_tick_with(&mut split, &derived, Duration::from_secs(1), rates);

        assert_eq!(once, derived.max_health - 48);
        assert_eq!(split.current_health(), once);
    }

    #[test]
    fn regen_is_tick_rate_independent() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -50);
        engine.modify_mana(&mut state, &derived, -50);
        for _ in 0..10 {
            engine.regen_tick(&mut state, &derived, Duration::from_millis(100));
        }
        assert_eq!(state.current_health(), derived.max_health - 49);
        assert_eq!(state.current_mana(), derived.max_mana - 48);
    }

    #[test]
    fn regen_stops_at_max() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -2);
        let events = engine.regen_tick(&mut state, &derived, Duration::from_secs(60));
        assert_eq!(state.current_health(), derived.max_health);
        assert_eq!(
            events,
            vec![ProgressionEvent::HealthChanged {
                current: derived.max_health,
                max: derived.max_health
            }]
        );
        assert_eq!(state.health_regen().pending(), Duration::ZERO);
    }

    #[test]
    fn regen_paused_while_dead() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -10_000);
        assert!(
            engine
                .regen_tick(&mut state, &derived, Duration::from_secs(30))
                .is_empty()
        );
        assert_eq!(state.current_health(), 0);
    }

    #[test]
    fn respawn_from_dead() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -10_000);
        engine.modify_mana(&mut state, &derived, -7);

        let events = engine.respawn(&mut state, &derived).unwrap();
        assert_eq!(state.current_health(), 205 / 4);
        assert_eq!(state.current_mana(), derived.max_mana - 7);
        assert_eq!(state.life(), LifeState::Alive);
        assert_eq!(
            events,
            vec![ProgressionEvent::HealthChanged { current: 51, max: 205 }]
        );
    }

    #[test]
    fn respawn_through_respawning() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -10_000);

        let delay = engine.begin_respawn(&mut state).unwrap();
        assert_eq!(delay, Duration::from_secs(3));
        assert_eq!(state.life(), LifeState::Respawning);

        engine.respawn(&mut state, &derived).unwrap();
        assert_eq!(state.life(), LifeState::Alive);
    }

    #[test]
    fn respawn_while_alive_is_rejected() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -5);
        let before = state.clone();

        let err = engine.respawn(&mut state, &derived).unwrap_err();
        assert_eq!(
            err,
            ProgressionError::InvalidLifeState {
                operation: "respawn",
                expected: "dead",
                actual: LifeState::Alive,
            }
        );
        assert_eq!(state, before);
        assert!(engine.begin_respawn(&mut state).is_err());
    }

    #[test]
    fn begin_respawn_twice_is_rejected() {
        let (engine, _, mut state, derived) = setup();
        engine.modify_health(&mut state, &derived, -10_000);
        engine.begin_respawn(&mut state).unwrap();
        let err = engine.begin_respawn(&mut state).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LIFE_STATE");
        assert_eq!(err.severity(), crate::ErrorSeverity::Validation);
        assert!(!err.severity().is_recoverable());
        assert_eq!(state.life(), LifeState::Respawning);
    }
}
