//! Cloneable façade for issuing commands to one character's worker.
//!
//! [`CharacterHandle`] hides channel plumbing and offers async helpers for
//! every engine operation. Commands from all clones are applied one at a
//! time, in arrival order, by the worker that owns the character.
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use progression_core::{Character, CharacterRecord, DamageRoll, DerivedStats, Events};

use super::errors::{Result, RuntimeError};
use crate::events::{CharacterEvent, EventBus, Topic};
use crate::workers::Command;

/// Runtime-assigned identifier of an active character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only copy of a character and its derived stats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterSnapshot {
    pub id: CharacterId,
    pub character: Character,
    pub derived: DerivedStats,
}

/// Client-facing handle to one active character.
#[derive(Clone)]
pub struct CharacterHandle {
    id: CharacterId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl CharacterHandle {
    pub(crate) fn new(id: CharacterId, command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Take a hit of `raw_damage` before defense.
    pub async fn apply_damage(&self, raw_damage: u32) -> Result<Events> {
        self.request(|reply| Command::ApplyDamage { raw_damage, reply })
            .await
    }

    /// Add a signed amount to current health.
    pub async fn modify_health(&self, delta: i64) -> Result<Events> {
        self.request(|reply| Command::ModifyHealth { delta, reply })
            .await
    }

    /// Add a signed amount to current mana.
    pub async fn modify_mana(&self, delta: i64) -> Result<Events> {
        self.request(|reply| Command::ModifyMana { delta, reply })
            .await
    }

    /// Spend mana, failing with [`progression_core::ProgressionError::InsufficientMana`].
    pub async fn spend_mana(&self, cost: u32) -> Result<Events> {
        self.request(|reply| Command::SpendMana { cost, reply })
            .await?
            .map_err(RuntimeError::from)
    }

    /// Grant experience; non-positive amounts are ignored.
    pub async fn add_experience(&self, amount: i64) -> Result<Events> {
        self.request(|reply| Command::AddExperience { amount, reply })
            .await
    }

    /// Roll outgoing damage using the worker's seeded RNG.
    pub async fn roll_damage(&self) -> Result<DamageRoll> {
        self.request(|reply| Command::RollDamage { reply }).await
    }

    /// Respawn immediately, skipping any pending respawn delay.
    pub async fn respawn_now(&self) -> Result<Events> {
        self.request(|reply| Command::Respawn { reply })
            .await?
            .map_err(RuntimeError::from)
    }

    /// Copy of the current character state.
    pub async fn snapshot(&self) -> Result<CharacterSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Persistence payload for the current character state.
    pub async fn save_record(&self) -> Result<CharacterRecord> {
        self.request(|reply| Command::Save { reply }).await
    }

    /// Stop the worker and return the character's final record.
    pub(crate) async fn stop(&self) -> Result<CharacterRecord> {
        self.request(|reply| Command::Stop { reply }).await
    }

    /// Subscribe to events from a specific topic.
    ///
    /// The bus is shared by every character; filter on
    /// [`CharacterEvent::character`] to follow just this one.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CharacterEvent> {
        self.event_bus.subscribe(topic)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
