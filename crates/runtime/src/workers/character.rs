//! Character worker that owns one authoritative [`Character`].
//!
//! Receives commands from [`crate::CharacterHandle`], applies them through
//! [`ProgressionEngine`], ticks regeneration, drives the respawn delay, and
//! publishes every resulting event on the [`EventBus`].

use std::future;
use std::ops::ControlFlow;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use progression_core::{
    Character, CharacterRecord, DamageRoll, Events, ProgressionEngine, ProgressionError,
    ProgressionEvent,
};

use crate::api::{CharacterId, CharacterSnapshot};
use crate::events::{CharacterEvent, EventBus};

/// Commands that can be sent to a character worker
pub(crate) enum Command {
    ApplyDamage {
        raw_damage: u32,
        reply: oneshot::Sender<Events>,
    },
    ModifyHealth {
        delta: i64,
        reply: oneshot::Sender<Events>,
    },
    ModifyMana {
        delta: i64,
        reply: oneshot::Sender<Events>,
    },
    SpendMana {
        cost: u32,
        reply: oneshot::Sender<Result<Events, ProgressionError>>,
    },
    AddExperience {
        amount: i64,
        reply: oneshot::Sender<Events>,
    },
    RollDamage {
        reply: oneshot::Sender<DamageRoll>,
    },
    /// Respawn now, cancelling any pending respawn timer.
    Respawn {
        reply: oneshot::Sender<Result<Events, ProgressionError>>,
    },
    Snapshot {
        reply: oneshot::Sender<CharacterSnapshot>,
    },
    Save {
        reply: oneshot::Sender<CharacterRecord>,
    },
    /// Reply with the final record and stop the worker. Commands queued
    /// behind this one are dropped unanswered.
    Stop {
        reply: oneshot::Sender<CharacterRecord>,
    },
}

/// Background task that processes one character's commands.
pub(crate) struct CharacterWorker {
    id: CharacterId,
    character: Character,
    engine: ProgressionEngine,
    rng: StdRng,
    regen_interval: Duration,
    auto_respawn: bool,
    respawn_at: Option<Instant>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl CharacterWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: CharacterId,
        character: Character,
        engine: ProgressionEngine,
        rng_seed: u64,
        regen_interval: Duration,
        auto_respawn: bool,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            character,
            engine,
            rng: StdRng::seed_from_u64(rng_seed),
            regen_interval,
            auto_respawn,
            respawn_at: None,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Exits on [`Command::Stop`] or once every handle has
    /// been dropped.
    pub(crate) async fn run(mut self) {
        let mut regen = tokio::time::interval(self.regen_interval);
        regen.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_regen = Instant::now();

        debug!(character = %self.id, name = %self.character.name, "character worker started");

        loop {
            let respawn_at = self.respawn_at;
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd).is_break() {
                            break;
                        }
                    }
                    None => break,
                },
                now = regen.tick() => {
                    let elapsed = now.saturating_duration_since(last_regen);
                    last_regen = now;
                    self.regen(elapsed);
                }
                _ = wait_until(respawn_at), if respawn_at.is_some() => {
                    self.respawn_at = None;
                    match self.respawn() {
                        Ok(_) => info!(character = %self.id, "respawned after delay"),
                        Err(error) => warn!(character = %self.id, %error, "scheduled respawn rejected"),
                    }
                }
            }
        }

        debug!(character = %self.id, "character worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::ApplyDamage { raw_damage, reply } => {
                let derived = self.engine.derive(&self.character.attributes);
                let events =
                    self.engine
                        .apply_damage(&mut self.character.state, &derived, raw_damage);
                debug!(
                    character = %self.id,
                    raw_damage,
                    defense = derived.defense,
                    health = self.character.state.current_health(),
                    "took damage"
                );
                let _ = reply.send(self.commit(events));
            }
            Command::ModifyHealth { delta, reply } => {
                let derived = self.engine.derive(&self.character.attributes);
                let events = self
                    .engine
                    .modify_health(&mut self.character.state, &derived, delta);
                let _ = reply.send(self.commit(events));
            }
            Command::ModifyMana { delta, reply } => {
                let derived = self.engine.derive(&self.character.attributes);
                let events = self
                    .engine
                    .modify_mana(&mut self.character.state, &derived, delta);
                let _ = reply.send(self.commit(events));
            }
            Command::SpendMana { cost, reply } => {
                let derived = self.engine.derive(&self.character.attributes);
                let result = self
                    .engine
                    .spend_mana(&mut self.character.state, &derived, cost)
                    .map(|events| self.commit(events));
                let _ = reply.send(result);
            }
            Command::AddExperience { amount, reply } => {
                let events = self.engine.add_experience(
                    &mut self.character.attributes,
                    &mut self.character.state,
                    amount,
                );
                debug!(
                    character = %self.id,
                    amount,
                    level = self.character.attributes.level,
                    experience = self.character.attributes.experience,
                    "gained experience"
                );
                let _ = reply.send(self.commit(events));
            }
            Command::RollDamage { reply } => {
                let derived = self.engine.derive(&self.character.attributes);
                let roll = self.engine.roll_damage(&derived, self.rng.r#gen::<f64>());
                if roll.critical {
                    debug!(character = %self.id, amount = roll.amount, "critical hit");
                }
                let _ = reply.send(roll);
            }
            Command::Respawn { reply } => {
                let result = self.respawn();
                if result.is_ok() {
                    self.respawn_at = None;
                }
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(CharacterSnapshot {
                    id: self.id,
                    character: self.character.clone(),
                    derived: self.engine.derive(&self.character.attributes),
                });
            }
            Command::Save { reply } => {
                let _ = reply.send(self.engine.save_character(&self.character));
            }
            Command::Stop { reply } => {
                self.command_rx.close();
                let _ = reply.send(self.engine.save_character(&self.character));
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn regen(&mut self, elapsed: Duration) {
        let derived = self.engine.derive(&self.character.attributes);
        let events = self
            .engine
            .regen_tick(&mut self.character.state, &derived, elapsed);
        if !events.is_empty() {
            trace!(
                character = %self.id,
                health = self.character.state.current_health(),
                mana = self.character.state.current_mana(),
                "regenerated"
            );
            self.commit(events);
        }
    }

    fn respawn(&mut self) -> Result<Events, ProgressionError> {
        let derived = self.engine.derive(&self.character.attributes);
        let events = self.engine.respawn(&mut self.character.state, &derived)?;
        Ok(self.commit(events))
    }

    /// Publish `events` and react to deaths, then hand the events back for
    /// the reply.
    fn commit(&mut self, events: Events) -> Events {
        for event in &events {
            match event {
                ProgressionEvent::LeveledUp { level } => {
                    info!(character = %self.id, level, "level up");
                }
                ProgressionEvent::Died => {
                    info!(character = %self.id, "died");
                    self.schedule_respawn();
                }
                _ => {}
            }
            self.event_bus.publish(CharacterEvent {
                character: self.id,
                event: event.clone(),
            });
        }
        events
    }

    fn schedule_respawn(&mut self) {
        if !self.auto_respawn {
            return;
        }
        match self.engine.begin_respawn(&mut self.character.state) {
            Ok(delay) => {
                debug!(character = %self.id, delay_ms = delay.as_millis() as u64, "respawn scheduled");
                self.respawn_at = Some(Instant::now() + delay);
            }
            Err(error) => warn!(character = %self.id, %error, "could not schedule respawn"),
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}
