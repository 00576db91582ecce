//! Simulation snapshot: the complete visible state handed to the host each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{ScreenPoint, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub run_state: RunState,
    /// Active projectiles only.
    pub projectiles: Vec<ProjectileView>,
    pub shield: ShieldView,
    pub body: BodyView,
    pub orbiter_position: Vec3,
    pub enemies: Vec<EnemyView>,
    pub targeting: TargetingView,
    pub weapon: WeaponView,
    pub combo: ComboView,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub slot: usize,
    pub position: Vec3,
    pub radius: f32,
    pub opacity: f32,
    pub color: [f32; 4],
    pub state: ProjectileState,
    pub kind: SpawnKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShieldView {
    pub hp: u32,
    pub max_hp: u32,
    pub destroyed: bool,
    /// Live ring entries (unit-sphere position, intensity).
    pub impacts: Vec<ImpactView>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpactView {
    pub local_position: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyView {
    pub hp: u32,
    pub max_hp: u32,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub position: Vec3,
    pub hp: u32,
    pub destroyed: bool,
    pub invulnerable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetingView {
    pub phase: LockPhase,
    pub enemy_id: Option<u32>,
    /// Lock progress (0.0 - 1.0).
    pub progress: f32,
    pub screen_position: ScreenPoint,
    /// Remaining cooldown as a fraction of the full cooldown.
    pub cooldown_fraction: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub phase: WeaponPhase,
    /// Progress through the current phase (0.0 - 1.0).
    pub phase_progress: f32,
    pub source: Vec3,
    pub beam_front: Vec3,
    pub target: Vec3,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboView {
    pub combo: u32,
    pub max_combo: u32,
    pub total_score: u64,
    pub destroyed_targets: u32,
    pub in_cooldown: bool,
}
