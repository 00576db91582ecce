//! Unattended run: start the loop, feed scripted input, log status, stop.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use starfall_core::commands::PlayerCommand;
use starfall_core::state::SimSnapshot;

use crate::config::{AppConfig, AutoplayConfig};
use crate::state::AppState;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Commands due at wall-clock time `elapsed`, given the previous poll time.
pub fn autoplay_commands(autoplay: &AutoplayConfig, previous: f32, elapsed: f32) -> Vec<PlayerCommand> {
    let interval = autoplay.shot_interval_secs;
    if interval <= 0.0 {
        return Vec::new();
    }
    let due = (elapsed / interval).floor() - (previous / interval).floor();
    (0..due.max(0.0) as usize)
        .map(|_| PlayerCommand::AimedShot {
            power: autoplay.shot_power.clamp(0.0, 1.0),
        })
        .collect()
}

pub fn log_status(snapshot: &SimSnapshot) {
    info!(
        t = snapshot.time.elapsed_secs,
        shield = snapshot.shield.hp,
        body = snapshot.body.hp,
        combo = snapshot.combo.combo,
        score = snapshot.combo.total_score,
        destroyed = snapshot.combo.destroyed_targets,
        lock = ?snapshot.targeting.phase,
        "status"
    );
}

pub fn run(config: AppConfig) -> Result<()> {
    let state = AppState::new();
    state.start(&config)?;

    let started = Instant::now();
    let mut previous = 0.0f32;
    let mut last_status = 0.0f32;

    loop {
        std::thread::sleep(POLL_INTERVAL);
        let elapsed = started.elapsed().as_secs_f32();
        if elapsed >= config.run_secs {
            break;
        }

        for command in autoplay_commands(&config.autoplay, previous, elapsed) {
            if let Err(e) = state.send_command(command) {
                warn!(error = %e, "autoplay command dropped");
            }
        }
        previous = elapsed;

        if elapsed - last_status >= config.status_interval_secs {
            last_status = elapsed;
            if let Some(snapshot) = state.snapshot() {
                log_status(&snapshot);
            }
            if config.autoplay.fire_special {
                state.send_command(PlayerCommand::FireSpecial)?;
            }
        }
    }

    state.shutdown()?;
    if let Some(snapshot) = state.snapshot() {
        log_status(&snapshot);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autoplay_fires_once_per_interval() {
        let autoplay = AutoplayConfig {
            shot_interval_secs: 1.0,
            shot_power: 0.4,
            fire_special: false,
        };
        assert!(autoplay_commands(&autoplay, 0.0, 0.5).is_empty());
        assert_eq!(autoplay_commands(&autoplay, 0.5, 1.2).len(), 1);
        assert_eq!(autoplay_commands(&autoplay, 1.2, 3.1).len(), 2);
    }

    #[test]
    fn test_autoplay_disabled_and_power_clamped() {
        let mut autoplay = AutoplayConfig {
            shot_interval_secs: 0.0,
            shot_power: 4.0,
            fire_special: false,
        };
        assert!(autoplay_commands(&autoplay, 0.0, 10.0).is_empty());

        autoplay.shot_interval_secs = 1.0;
        let commands = autoplay_commands(&autoplay, 0.0, 1.0);
        assert!(matches!(
            commands.as_slice(),
            [PlayerCommand::AimedShot { power }] if *power == 1.0
        ));
    }
}
