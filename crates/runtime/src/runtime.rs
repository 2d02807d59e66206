//! High-level runtime orchestrator.
//!
//! The runtime owns one background worker per active character, wires up
//! command/event channels, and hands out [`CharacterHandle`]s to clients.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use progression_core::{
    Character, CharacterAttributes, CharacterRecord, ProgressionConfig, ProgressionEngine,
};

use crate::api::{CharacterHandle, CharacterId, Result, RuntimeError};
use crate::events::{CharacterEvent, EventBus, Topic};
use crate::workers::{CharacterWorker, Command};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub progression: ProgressionConfig,
    /// How often each worker ticks regeneration.
    pub regen_interval: Duration,
    pub command_buffer_size: usize,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Base seed for damage rolls; mixed with the character id per worker.
    pub rng_seed: u64,
    /// Start the respawn timer automatically when a character dies.
    pub auto_respawn: bool,
}

impl RuntimeConfig {
    pub const DEFAULT_REGEN_INTERVAL: Duration = Duration::from_millis(100);
    pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 32;
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 256;
    pub const DEFAULT_RNG_SEED: u64 = 0x5EED;

    /// Defaults overridden by `PROGRESSION_*` environment variables.
    ///
    /// Unset or unparsable variables keep their default value.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("PROGRESSION_REGEN_INTERVAL_MS")
            && ms > 0
        {
            config.regen_interval = Duration::from_millis(ms);
        }
        if let Some(size) = read_env("PROGRESSION_COMMAND_BUFFER_SIZE") {
            config.command_buffer_size = size;
        }
        if let Some(size) = read_env("PROGRESSION_EVENT_BUFFER_SIZE") {
            config.event_buffer_size = size;
        }
        if let Some(seed) = read_env("PROGRESSION_RNG_SEED") {
            config.rng_seed = seed;
        }
        if let Some(enabled) = read_env_bool("PROGRESSION_AUTO_RESPAWN") {
            config.auto_respawn = enabled;
        }
        if let Some(ms) = read_env::<u64>("PROGRESSION_RESPAWN_DELAY_MS") {
            config.progression.respawn_delay_ms = ms;
        }

        config
    }

    pub fn with_progression(mut self, progression: ProgressionConfig) -> Self {
        self.progression = progression;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            progression: ProgressionConfig::default(),
            regen_interval: Self::DEFAULT_REGEN_INTERVAL,
            command_buffer_size: Self::DEFAULT_COMMAND_BUFFER_SIZE,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
            rng_seed: Self::DEFAULT_RNG_SEED,
            auto_respawn: true,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

struct ActiveCharacter {
    handle: CharacterHandle,
    worker: JoinHandle<()>,
}

impl ActiveCharacter {
    async fn stop(self) -> Result<CharacterRecord> {
        let record = self.handle.stop().await?;
        self.worker.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(record)
    }
}

/// Main runtime that owns every active character.
///
/// Each character lives in its own worker task; [`CharacterHandle`] is the
/// cloneable façade clients use to reach it.
pub struct Runtime {
    config: RuntimeConfig,
    engine: ProgressionEngine,
    event_bus: EventBus,
    next_id: u32,
    characters: HashMap<CharacterId, ActiveCharacter>,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            engine: ProgressionEngine::new(config.progression.clone()),
            event_bus: EventBus::with_capacity(config.event_buffer_size),
            next_id: 1,
            characters: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    /// Create a fresh character at full health and mana.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create_character(
        &mut self,
        name: impl Into<String>,
        attributes: CharacterAttributes,
    ) -> CharacterHandle {
        let state = self.engine.initialize(&attributes);
        self.spawn(Character {
            name: name.into(),
            attributes,
            state,
        })
    }

    /// Bring a persisted character into play.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load_character(&mut self, record: &CharacterRecord) -> CharacterHandle {
        let character = self.engine.load_character(record);
        self.spawn(character)
    }

    fn spawn(&mut self, character: Character) -> CharacterHandle {
        let id = CharacterId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let handle = CharacterHandle::new(id, command_tx, self.event_bus.clone());

        info!(
            character = %id,
            name = %character.name,
            class = %character.attributes.class,
            level = character.attributes.level,
            "character spawned"
        );

        let worker = CharacterWorker::new(
            id,
            character,
            self.engine.clone(),
            worker_seed(self.config.rng_seed, id),
            self.config.regen_interval,
            self.config.auto_respawn,
            command_rx,
            self.event_bus.clone(),
        );
        let worker = tokio::spawn(worker.run());

        self.characters.insert(
            id,
            ActiveCharacter {
                handle: handle.clone(),
                worker,
            },
        );
        handle
    }

    /// Handle to an active character.
    pub fn character(&self, id: CharacterId) -> Result<CharacterHandle> {
        self.characters
            .get(&id)
            .map(|active| active.handle.clone())
            .ok_or(RuntimeError::UnknownCharacter(id))
    }

    /// Ids of every active character, in ascending order.
    pub fn character_ids(&self) -> Vec<CharacterId> {
        let mut ids: Vec<_> = self.characters.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Take a character out of play, returning its final record.
    ///
    /// The worker is stopped and joined before this returns. Outstanding
    /// handle clones fail with [`RuntimeError::CommandChannelClosed`]
    /// afterwards.
    pub async fn remove_character(&mut self, id: CharacterId) -> Result<CharacterRecord> {
        let active = self
            .characters
            .remove(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;

        let record = active.stop().await?;
        debug!(character = %id, "character removed");

        Ok(record)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Subscribe to events from a specific topic, for every character.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CharacterEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Shutdown the runtime gracefully.
    ///
    /// Every worker is stopped and joined, including those that clients
    /// still hold handles to.
    pub async fn shutdown(self) -> Result<()> {
        for (_, active) in self.characters {
            active.stop().await?;
        }

        info!("runtime stopped");
        Ok(())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

fn worker_seed(base: u64, id: CharacterId) -> u64 {
    base ^ u64::from(id.0).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
