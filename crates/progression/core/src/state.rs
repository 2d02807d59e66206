//! Mutable per-character state owned by the engine's caller.
//!
//! Current resources are game state and must be stored alongside the
//! attributes; maximums are not, they come from [`DerivedStats`].

use core::time::Duration;

use crate::stats::{DerivedStats, ResourceKind};

/// Life-state machine.
///
/// ```text
/// Alive ──health hits 0──▶ Dead ──begin_respawn──▶ Respawning
///   ▲                        │                         │
///   └────────respawn─────────┴─────────respawn─────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
    Respawning,
}

impl LifeState {
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Dead or waiting to respawn.
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Dead | Self::Respawning)
    }
}

/// Time banked toward the next regenerated point of one resource.
///
/// Stored as an exact [`Duration`] so that splitting the same elapsed time
/// into more ticks never changes the total regenerated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenAccumulator {
    pending: Duration,
}

impl RegenAccumulator {
    pub const fn pending(&self) -> Duration {
        self.pending
    }

    /// Bank `elapsed` and return how many points were earned, capped at
    /// `missing`. Nothing is banked while the resource is full, and the bank
    /// empties when the resource fills up.
    pub fn accumulate(&mut self, elapsed: Duration, interval: Duration, missing: u32) -> u32 {
        if missing == 0 {
            self.pending = Duration::ZERO;
            return 0;
        }

        self.pending = self.pending.saturating_add(elapsed);
        let crossings = self.pending.as_nanos() / interval.as_nanos().max(1);
        let points = crossings.min(u128::from(missing)) as u32;

        if points == missing {
            self.pending = Duration::ZERO;
        } else {
            self.pending = self
                .pending
                .saturating_sub(interval.saturating_mul(points));
        }
        points
    }

    pub fn reset(&mut self) {
        self.pending = Duration::ZERO;
    }
}

/// Current resources and life state of a character in active play.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeState {
    pub(crate) health: u32,
    pub(crate) mana: u32,
    pub(crate) life: LifeState,
    pub(crate) health_regen: RegenAccumulator,
    pub(crate) mana_regen: RegenAccumulator,
}

impl RuntimeState {
    /// Full resources.
    pub fn at_max(derived: &DerivedStats) -> Self {
        Self {
            health: derived.max_health,
            mana: derived.max_mana,
            life: LifeState::Alive,
            health_regen: RegenAccumulator::default(),
            mana_regen: RegenAccumulator::default(),
        }
    }

    /// Rebuild state from stored current values, clamped to the maximums.
    ///
    /// A stored health of 0 resumes as [`LifeState::Dead`].
    pub fn restore(health: u32, mana: u32, derived: &DerivedStats) -> Self {
        let health = health.min(derived.max_health);
        Self {
            health,
            mana: mana.min(derived.max_mana),
            life: if health == 0 {
                LifeState::Dead
            } else {
                LifeState::Alive
            },
            health_regen: RegenAccumulator::default(),
            mana_regen: RegenAccumulator::default(),
        }
    }

    pub const fn current_health(&self) -> u32 {
        self.health
    }

    pub const fn current_mana(&self) -> u32 {
        self.mana
    }

    pub fn current(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Health => self.health,
            ResourceKind::Mana => self.mana,
        }
    }

    pub const fn life(&self) -> LifeState {
        self.life
    }

    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub const fn has_mana(&self, amount: u32) -> bool {
        self.mana >= amount
    }

    pub const fn health_regen(&self) -> RegenAccumulator {
        self.health_regen
    }

    pub const fn mana_regen(&self) -> RegenAccumulator {
        self.mana_regen
    }

    /// Health as a fraction of max, in `[0, 1]`.
    pub fn health_fraction(&self, derived: &DerivedStats) -> f32 {
        fraction(u64::from(self.health), u64::from(derived.max_health))
    }

    /// Mana as a fraction of max, in `[0, 1]`.
    pub fn mana_fraction(&self, derived: &DerivedStats) -> f32 {
        fraction(u64::from(self.mana), u64::from(derived.max_mana))
    }

    pub(crate) fn current_mut(&mut self, resource: ResourceKind) -> &mut u32 {
        match resource {
            ResourceKind::Health => &mut self.health,
            ResourceKind::Mana => &mut self.mana,
        }
    }
}

/// Progress toward the next level, in `[0, 1)`.
pub fn experience_fraction(experience: u64, derived: &DerivedStats) -> f32 {
    fraction(experience, derived.experience_to_next_level)
}

fn fraction(current: u64, max: u64) -> f32 {
    if max == 0 {
        0.0
    } else {
        (current as f64 / max as f64).clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProgressionConfig;
    use crate::stats::CharacterAttributes;

    fn derived() -> DerivedStats {
        DerivedStats::compute(&CharacterAttributes::default(), &ProgressionConfig::default())
    }

    #[test]
    fn restore_clamps_to_maximums() {
        let derived = derived();
        let state = RuntimeState::restore(10_000, 10_000, &derived);
        assert_eq!(state.current_health(), derived.max_health);
        assert_eq!(state.current_mana(), derived.max_mana);
        assert_eq!(state.life(), LifeState::Alive);
    }

    #[test]
    fn restore_zero_health_is_dead() {
        let state = RuntimeState::restore(0, 5, &derived());
        assert_eq!(state.life(), LifeState::Dead);
        assert!(!state.is_alive());
    }

    #[test]
    fn accumulator_keeps_remainder() {
        let mut acc = RegenAccumulator::default();
        let interval = Duration::from_millis(500);
        assert_eq!(acc.accumulate(Duration::from_millis(1_200), interval, 10), 2);
        assert_eq!(acc.pending(), Duration::from_millis(200));
        assert_eq!(acc.accumulate(Duration::from_millis(300), interval, 10), 1);
        assert_eq!(acc.pending(), Duration::ZERO);
    }

    #[test]
    fn accumulator_ignores_time_while_full() {
        let mut acc = RegenAccumulator::default();
        assert_eq!(acc.accumulate(Duration::from_secs(5), Duration::from_secs(1), 0), 0);
        assert_eq!(acc.pending(), Duration::ZERO);
    }

    #[test]
    fn accumulator_caps_at_missing_and_empties() {
        let mut acc = RegenAccumulator::default();
        assert_eq!(acc.accumulate(Duration::from_secs(10), Duration::from_secs(1), 3), 3);
        assert_eq!(acc.pending(), Duration::ZERO);
    }

    #[test]
    fn fractions() {
        let derived = derived();
        let state = RuntimeState::restore(derived.max_health / 2, 0, &derived);
        assert!((state.health_fraction(&derived) - 0.5).abs() < 0.01);
        assert_eq!(state.mana_fraction(&derived), 0.0);
        assert!((experience_fraction(55, &derived) - 0.5).abs() < f32::EPSILON);
    }
}
