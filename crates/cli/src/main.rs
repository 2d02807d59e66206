//! Scripted progression session entry point.
//!
//! Spawns one character, drives it through an experience grant, a fight,
//! a death and a respawn, and prints every event the runtime publishes.
mod config;

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use config::CliConfig;
use progression_content::ContentFactory;
use progression_core::ProgressionEvent;
use progression_runtime::{
    CharacterEvent, CharacterHandle, Runtime, RuntimeConfig, RuntimeError, Topic,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = dotenvy::dotenv() {
        tracing::debug!(%error, "no .env file loaded");
    }

    let cli = CliConfig::from_env();
    let factory = match &cli.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    info!(data_dir = %factory.data_dir().display(), "loading content");

    let progression = factory
        .load_config()
        .with_context(|| format!("loading content from {}", factory.data_dir().display()))?;
    let starters = factory.load_starters()?;

    let config = RuntimeConfig::from_env().with_progression(progression);
    let respawn_delay = config.progression.respawn_delay();
    let mut runtime = Runtime::new(config);

    let printers: Vec<_> = runtime
        .event_bus()
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, events)| tokio::spawn(print_events(topic, events)))
        .collect();

    let hero = runtime.create_character(&cli.name, starters.attributes_for(cli.class));
    run_session(&hero, cli.experience, respawn_delay).await?;

    let id = hero.id();
    drop(hero);
    let record = runtime.remove_character(id).await?;
    println!("saved: {record:?}");

    runtime.shutdown().await?;
    for printer in printers {
        printer.await.context("event printer panicked")?;
    }
    Ok(())
}

async fn run_session(hero: &CharacterHandle, experience: i64, respawn_delay: Duration) -> Result<()> {
    hero.add_experience(experience).await?;

    for _ in 0..3 {
        let roll = hero.roll_damage().await?;
        let tag = if roll.critical { " (critical)" } else { "" };
        println!("{} swings for {}{tag}", hero.id(), roll.amount);
    }

    match hero.spend_mana(25).await {
        Ok(_) => {}
        Err(RuntimeError::Progression(error)) if error.severity().is_recoverable() => {
            warn!(%error, "could not cast");
        }
        Err(error) => return Err(error.into()),
    }
    hero.apply_damage(60).await?;

    let snapshot = hero.snapshot().await?;
    let lethal = snapshot
        .character
        .state
        .current_health()
        .saturating_add(snapshot.derived.defense);
    hero.apply_damage(lethal.saturating_add(100)).await?;

    tokio::time::sleep(respawn_delay + Duration::from_millis(250)).await;

    let snapshot = hero.snapshot().await?;
    let state = &snapshot.character.state;
    println!(
        "{} {} level {} [{}] health {}/{} mana {}/{} xp {:.0}%",
        snapshot.character.name,
        snapshot.character.attributes.class,
        snapshot.character.attributes.level,
        state.life(),
        state.current_health(),
        snapshot.derived.max_health,
        state.current_mana(),
        snapshot.derived.max_mana,
        snapshot.character.experience_fraction(&snapshot.derived) * 100.0,
    );
    Ok(())
}

/// Print events from one topic until the runtime shuts down.
async fn print_events(topic: Topic, mut events: broadcast::Receiver<CharacterEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => println!("{} {}", event.character, describe(&event.event)),
            Err(RecvError::Lagged(skipped)) => warn!(?topic, skipped, "event printer lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

fn describe(event: &ProgressionEvent) -> String {
    match event {
        ProgressionEvent::HealthChanged { current, max } => format!("health {current}/{max}"),
        ProgressionEvent::ManaChanged { current, max } => format!("mana {current}/{max}"),
        ProgressionEvent::ExperienceChanged {
            experience,
            to_next_level,
        } => format!("experience {experience}/{to_next_level}"),
        ProgressionEvent::LeveledUp { level } => format!("reached level {level}"),
        ProgressionEvent::StatsChanged(stats) => format!(
            "stats attack {} defense {} crit {}%",
            stats.attack_power, stats.defense, stats.critical_chance_percent
        ),
        ProgressionEvent::Died => "died".to_owned(),
    }
}
