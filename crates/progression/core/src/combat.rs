//! Damage rolls and mitigation.
//!
//! Pure functions: the random draw is supplied by the caller, and the
//! attacker is never known here.

use crate::config::ProgressionConfig;
use crate::stats::DerivedStats;

/// Outcome of [`roll_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub amount: u32,
    pub critical: bool,
}

/// Roll outgoing damage.
///
/// # Formula
///
/// ```text
/// critical = uniform < crit% / 100
/// amount   = critical ? round(attack × crit_damage% / 100) : attack
/// ```
///
/// `uniform` is expected in `[0, 1)`; values outside that range simply
/// always or never crit.
pub fn roll_damage(derived: &DerivedStats, config: &ProgressionConfig, uniform: f64) -> DamageRoll {
    let critical = uniform < f64::from(derived.critical_chance_percent) / 100.0;

    let amount = if critical {
        // Round half up in integer space.
        let scaled = u64::from(derived.attack_power) * u64::from(config.critical_damage_percent);
        ((scaled + 50) / 100).min(u64::from(u32::MAX)) as u32
    } else {
        derived.attack_power
    };

    DamageRoll { amount, critical }
}

/// Damage actually taken from a raw hit.
///
/// Defense subtracts flat, but never below `config.minimum_damage` (itself
/// at least 1, so no hit is ever fully absorbed).
pub fn mitigate_damage(derived: &DerivedStats, config: &ProgressionConfig, raw: u32) -> u32 {
    raw.saturating_sub(derived.defense)
        .max(config.minimum_damage.max(1))
}
