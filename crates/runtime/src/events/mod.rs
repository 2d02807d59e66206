//! Topic-based event bus for character events.
//!
//! Workers publish every [`progression_core::ProgressionEvent`] they produce,
//! tagged with the character it belongs to, and consumers subscribe only to
//! the topics they need.

mod bus;

pub use bus::{CharacterEvent, EventBus, Topic};
