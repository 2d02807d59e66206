//! Notifications produced by engine operations.
//!
//! Every mutating call returns the events it produced, in the order the
//! state changes happened. Callers forward them to UI or telemetry.

use crate::stats::DerivedStats;

/// A state change observable by collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionEvent {
    HealthChanged { current: u32, max: u32 },
    ManaChanged { current: u32, max: u32 },
    ExperienceChanged { experience: u64, to_next_level: u64 },
    LeveledUp { level: u32 },
    /// Derived stats changed as a result of a level-up.
    StatsChanged(DerivedStats),
    /// Health reached 0. Emitted once per death.
    Died,
}

impl ProgressionEvent {
    /// Vital events concern current health/mana and life state.
    pub const fn is_vital(&self) -> bool {
        matches!(
            self,
            Self::HealthChanged { .. } | Self::ManaChanged { .. } | Self::Died
        )
    }
}

/// Ordered events produced by one call.
pub type Events = Vec<ProgressionEvent>;
