//! Deterministic character progression rules.
//!
//! `progression-core` owns the stat-derivation model (primary attributes to
//! combat stats), the experience curve with class-based growth, resource
//! regeneration, and the life-state machine (alive, dead, respawning).
//!
//! Every operation is a synchronous, pure function over explicit values: the
//! caller owns [`CharacterAttributes`] and [`RuntimeState`], passes them in,
//! and receives the ordered [`ProgressionEvent`]s each call produced. Nothing
//! here reads a clock, touches storage, or draws random numbers.
pub mod character;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod state;
pub mod stats;

pub use character::{Character, CharacterRecord};
pub use combat::{DamageRoll, mitigate_damage, roll_damage};
pub use config::{ProgressionConfig, RegenRates};
pub use engine::ProgressionEngine;
pub use error::{ErrorSeverity, ProgressionError};
pub use event::{Events, ProgressionEvent};
pub use state::{LifeState, RegenAccumulator, RuntimeState};
pub use stats::{
    CharacterAttributes, CharacterClass, DerivedStats, GrowthTable, ResourceKind, StatGrowth,
};
