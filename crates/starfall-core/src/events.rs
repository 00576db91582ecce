//! Events emitted by the simulation for screen effects, audio and UI.
//!
//! Events are drained into each snapshot; the host decides how to render them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::ScreenPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    // --- Projectiles ---
    /// A projectile left the pool.
    ProjectileSpawned { slot: usize, kind: SpawnKind },
    /// A spawn was dropped because no slot was free.
    SpawnDropped { kind: SpawnKind },

    // --- Collisions ---
    ShieldHit {
        position: Vec3,
        hp: u32,
        intensity: f32,
    },
    ShieldDestroyed,
    BodyHit {
        position: Vec3,
        hp: u32,
        intensity: f32,
    },
    /// Fires once; the destroyed-target bonus accompanies it.
    BodyDestroyed { bonus: u64 },
    /// Visual-only hit on the orbiting body.
    OrbiterHit { position: Vec3, intensity: f32 },
    /// Flash overlay request for a target hit.
    ScreenImpact { point: ScreenPoint, intensity: f32 },
    /// Crack overlay request from a screen-directed projectile.
    ScreenCrack { point: ScreenPoint, intensity: f32 },

    // --- Targeting / weapon ---
    TargetAcquired { enemy_id: u32 },
    TargetLocked { enemy_id: u32 },
    TargetLost { enemy_id: u32 },
    SpecialFired { enemy_id: u32, hits: u32 },
    FireRejected { reason: FireRejection },
    WeaponCompleted,
    EnemyDestroyed { enemy_id: u32 },
    EnemyRespawned { enemy_id: u32 },

    // --- Scoring ---
    /// Points awarded for one qualifying impact.
    ComboImpact { combo: u32, points: u64 },
    /// A combo ran past its timeout and decayed.
    ComboEnded { combo: u32 },
    /// A combo hit the duration ceiling; cooldown started.
    ComboExpired { combo: u32 },

    // --- Persistence ---
    ProgressReconciled,
}
