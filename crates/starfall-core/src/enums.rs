//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle of a pooled projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileState {
    /// In the free list, not simulated.
    #[default]
    Idle,
    /// Moving under velocity and the central pull.
    Falling,
    /// Expanding and brightening after a hit.
    Impacting,
    /// Fading out before returning to the pool.
    Fading,
}

impl ProjectileState {
    /// True for every state that occupies a slot.
    pub fn is_active(self) -> bool {
        !matches!(self, ProjectileState::Idle)
    }
}

/// How a projectile entered the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    /// Background shower on a timer.
    #[default]
    Ambient,
    /// Launched by the player with a power value.
    PlayerAimed,
    /// Flies at the camera and cracks the screen.
    ScreenDirected,
}

/// Start template for screen-directed projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenTemplate {
    Right,
    Left,
    Top,
    Center,
}

impl ScreenTemplate {
    pub const ALL: [ScreenTemplate; 4] = [
        ScreenTemplate::Right,
        ScreenTemplate::Left,
        ScreenTemplate::Top,
        ScreenTemplate::Center,
    ];

    /// Nominal world-space start point.
    pub fn origin(self) -> [f32; 3] {
        match self {
            ScreenTemplate::Right => [5.0, 1.0, -6.0],
            ScreenTemplate::Left => [-5.0, 1.0, -6.0],
            ScreenTemplate::Top => [0.0, 4.5, -6.0],
            ScreenTemplate::Center => [0.0, 1.5, -8.0],
        }
    }
}

/// Collision target kinds, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Shield,
    CentralBody,
    OrbitingBody,
}

/// Lock-on state machine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockPhase {
    #[default]
    NoTarget,
    Searching,
    Locked,
    Firing,
}

/// Special weapon timeline phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponPhase {
    #[default]
    Inactive,
    Charging,
    Traveling,
    Impact,
}

/// Enemy craft variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Heavier craft that closes on the central body.
    #[default]
    Attacker,
    /// Light craft that wanders the outer orbit.
    Scout,
}

/// What produced a combo-qualifying impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactSource {
    Shield,
    CentralBody,
    SpecialWeapon,
}

/// Why a special-weapon fire request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireRejection {
    /// No target is fully locked.
    NotLocked,
    /// The post-fire cooldown has not elapsed.
    CoolingDown,
    /// A previous shot is still in its timeline.
    WeaponBusy,
    /// The locked target no longer resolves to a live enemy.
    TargetLost,
}

/// Overall run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}
