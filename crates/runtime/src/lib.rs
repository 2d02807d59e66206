//! Runtime orchestration for character progression.
//!
//! `progression-core` is a pure calculator that must never see two writers
//! for the same character. This crate provides that discipline: every active
//! character is owned by a single worker task that applies commands in the
//! order they arrive, ticks regeneration on its own interval, and enforces
//! the respawn delay. Clients talk to workers through [`CharacterHandle`]
//! and observe changes through the topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and its configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`workers`] keeps the per-character tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{CharacterHandle, CharacterId, CharacterSnapshot, Result, RuntimeError};
pub use events::{CharacterEvent, EventBus, Topic};
pub use runtime::{Runtime, RuntimeConfig};
