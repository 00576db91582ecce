//! Game loop thread: runs the simulation engine at `TICK_RATE` Hz.
//!
//! The engine is created inside the thread, which owns it exclusively.
//! Commands arrive via an `mpsc` channel; the latest snapshot is stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use starfall_core::constants::{DT, TICK_RATE};
use starfall_core::events::SimEvent;
use starfall_core::state::SimSnapshot;
use starfall_persist::{JsonFileStore, RemoteLink};
use starfall_sim::SimulationEngine;

use crate::config::AppConfig;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Build an engine backed by the configured local and remote stores.
pub fn build_engine(config: &AppConfig) -> Result<SimulationEngine> {
    let storage = &config.storage;
    let local = JsonFileStore::new(&storage.save_dir, storage.slot.as_str());
    let remote = match &storage.remote_dir {
        Some(dir) => Some(
            RemoteLink::spawn(JsonFileStore::new(dir, storage.slot.as_str()))
                .context("failed to start remote sync worker")?,
        ),
        None => None,
    };
    info!(
        save = %local.path().display(),
        remote = storage.remote_dir.is_some(),
        "progress stores ready"
    );
    Ok(SimulationEngine::with_persistence(
        config.sim.clone(),
        Box::new(local),
        remote,
    ))
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: &AppConfig,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let engine = build_engine(config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("starfall-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &latest_snapshot))
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown or channel disconnect, then saves.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            break;
        }

        // 2. Advance one tick
        let snapshot = engine.tick(DT);
        log_milestones(&snapshot.events);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; skip ahead instead of catching up.
            next_tick_time = now;
        }
    }

    engine.save_progress();
}

/// Forward queued commands to the engine. Returns false when the loop should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

fn log_milestones(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::ComboExpired { combo } => debug!(combo, "combo hit the duration ceiling"),
            SimEvent::ScreenCrack { point, .. } => debug!(x = point.x, y = point.y, "screen cracked"),
            SimEvent::ShieldDestroyed => info!("shield down"),
            _ => {}
        }
    }
}
