//! Player commands sent from the host to the simulation.
//!
//! Commands may be produced on any thread; they are queued and processed
//! at the next tick boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Projectiles ---
    /// Launch a player-aimed projectile. `power` must lie in [0, 1].
    AimedShot { power: f32 },
    /// Ambient spawn rate multiplier (clamped).
    SetIntensity { intensity: f32 },
    /// Ambient speed multiplier (clamped).
    SetPowerMultiplier { multiplier: f32 },

    // --- Targeting ---
    /// A tap in normalized device coordinates.
    TapScreen { x: f32, y: f32 },
    /// Lock a specific enemy immediately.
    TapEnemy { enemy_id: u32 },
    /// Fire the special weapon at the locked target.
    FireSpecial,

    // --- Simulation control ---
    /// Restore shield and central body to full HP.
    ResetProgress,
    Pause,
    Resume,
}
