use core::time::Duration;

use crate::stats::GrowthTable;

/// Progression tuning constants and the class growth table.
///
/// Passed to [`crate::ProgressionEngine`] at construction. Every field has a
/// default, so content files only need to list what they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// Flat critical chance added to AGI / 2, in whole percent.
    pub base_critical_chance_percent: u32,
    /// Critical hit damage as a percentage of attack power (150 = ×1.5).
    pub critical_damage_percent: u32,
    /// Floor applied to damage after defense; keeps every hit meaningful.
    pub minimum_damage: u32,
    /// Default regeneration rates used by [`crate::ProgressionEngine::regen_tick`].
    pub regen: RegenRates,
    /// Suggested delay between death and respawn. Enforced by the caller.
    pub respawn_delay_ms: u64,
    /// Respawn restores `max_health / respawn_health_divisor`.
    pub respawn_health_divisor: u32,
    /// Per-level primary stat growth by class.
    pub growth: GrowthTable,
}

impl ProgressionConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_CRITICAL_CHANCE_PERCENT: u32 = 5;
    pub const DEFAULT_CRITICAL_DAMAGE_PERCENT: u32 = 150;
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;
    pub const DEFAULT_RESPAWN_DELAY_MS: u64 = 3_000;
    pub const DEFAULT_RESPAWN_HEALTH_DIVISOR: u32 = 4;

    pub fn new() -> Self {
        Self {
            base_critical_chance_percent: Self::DEFAULT_BASE_CRITICAL_CHANCE_PERCENT,
            critical_damage_percent: Self::DEFAULT_CRITICAL_DAMAGE_PERCENT,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            regen: RegenRates::default(),
            respawn_delay_ms: Self::DEFAULT_RESPAWN_DELAY_MS,
            respawn_health_divisor: Self::DEFAULT_RESPAWN_HEALTH_DIVISOR,
            growth: GrowthTable::default(),
        }
    }

    pub fn with_base_critical_chance_percent(mut self, percent: u32) -> Self {
        self.base_critical_chance_percent = percent;
        self
    }

    pub fn with_critical_damage_percent(mut self, percent: u32) -> Self {
        self.critical_damage_percent = percent;
        self
    }

    pub fn with_regen(mut self, regen: RegenRates) -> Self {
        self.regen = regen;
        self
    }

    pub fn with_respawn_delay(mut self, delay: Duration) -> Self {
        self.respawn_delay_ms = delay.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    pub fn with_growth(mut self, growth: GrowthTable) -> Self {
        self.growth = growth;
        self
    }

    pub fn respawn_delay(&self) -> Duration {
        Duration::from_millis(self.respawn_delay_ms)
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Points regenerated per second for each resource.
///
/// A rate that is zero, negative or not finite disables regeneration of that
/// resource.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegenRates {
    pub health_per_second: f64,
    pub mana_per_second: f64,
}

impl RegenRates {
    pub const DEFAULT_HEALTH_PER_SECOND: f64 = 1.0;
    pub const DEFAULT_MANA_PER_SECOND: f64 = 2.0;

    pub const fn new(health_per_second: f64, mana_per_second: f64) -> Self {
        Self {
            health_per_second,
            mana_per_second,
        }
    }

    /// Time needed to regenerate a single point at `rate`, or `None` when
    /// the rate disables regeneration.
    pub fn interval(rate: f64) -> Option<Duration> {
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(1.0 / rate)
            .ok()
            .map(|interval| interval.max(Duration::from_nanos(1)))
    }
}

impl Default for RegenRates {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_HEALTH_PER_SECOND,
            Self::DEFAULT_MANA_PER_SECOND,
        )
    }
}
