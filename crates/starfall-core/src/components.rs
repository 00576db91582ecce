//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in the sim crate's systems.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;

/// World position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Marker for hostile craft.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Enemy;

/// Marker for the player-controlled craft (weapon source).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerCraft;

/// Stable identity of an enemy, visible to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTag {
    pub id: u32,
    pub kind: EnemyKind,
}

/// Countdown until a destroyed enemy returns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Respawn {
    pub remaining_secs: f32,
}

/// Damage is ignored while this is present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Invulnerable {
    pub remaining_secs: f32,
}
