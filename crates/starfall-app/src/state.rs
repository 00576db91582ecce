//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Result};
use tracing::info;

use starfall_core::commands::PlayerCommand;
use starfall_core::state::SimSnapshot;

use crate::config::AppConfig;
use crate::game_loop;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Save progress and stop the game loop thread.
    Shutdown,
}

/// Shared application state.
///
/// `mpsc::Sender` is wrapped in a `Mutex` so the state can be shared by
/// reference across input threads.
#[derive(Default)]
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.lock().map(|tx| tx.is_some()).unwrap_or(false)
    }

    /// Start the game loop thread.
    pub fn start(&self, config: &AppConfig) -> Result<()> {
        let mut tx_lock = self.command_tx.lock().map_err(|e| anyhow!("{e}"))?;
        if tx_lock.is_some() {
            bail!("simulation already running");
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;
        *tx_lock = Some(cmd_tx);
        if let Ok(mut handle_lock) = self.loop_handle.lock() {
            *handle_lock = Some(handle);
        }
        Ok(())
    }

    /// Forward a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<()> {
        let tx_lock = self.command_tx.lock().map_err(|e| anyhow!("{e}"))?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|e| anyhow!("failed to send command: {e}")),
            None => bail!("simulation not started"),
        }
    }

    /// Latest snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Option<SimSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Stop the loop and wait for its final save.
    pub fn shutdown(&self) -> Result<()> {
        let tx = self.command_tx.lock().map_err(|e| anyhow!("{e}"))?.take();
        let Some(tx) = tx else {
            return Ok(());
        };
        // The loop may already have exited; joining below still succeeds.
        let _ = tx.send(GameLoopCommand::Shutdown);

        let handle = self.loop_handle.lock().map_err(|e| anyhow!("{e}"))?.take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| anyhow!("game loop thread panicked"))?;
        }
        info!("game loop stopped");
        Ok(())
    }
}
