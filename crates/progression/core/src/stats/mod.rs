//! Stat system.
//!
//! ```text
//! [ CharacterAttributes ]  (stored: class, level, experience, primaries)
//!      ↓
//! [ DerivedStats ]         (computed: max resources, attack, defense, crit)
//!      ↓
//! [ RuntimeState ]         (stored: current health/mana, life state)
//! ```
//!
//! Derived values are never stored. They are recomputed from attributes
//! whenever a caller needs them, so they cannot drift from their source.

pub mod attributes;
pub mod derived;
pub mod growth;

pub use attributes::{CharacterAttributes, CharacterClass};
pub use derived::{DerivedStats, ResourceKind};
pub use growth::{GrowthTable, StatGrowth};
