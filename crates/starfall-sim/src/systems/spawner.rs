//! Projectile spawning: ambient showers, player-aimed shots and
//! screen-directed strikes.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use starfall_core::constants::*;
use starfall_core::enums::{ScreenTemplate, SpawnKind};
use starfall_core::error::{SimError, SimResult};
use starfall_core::events::SimEvent;
use starfall_core::types::direction_to;

use crate::pool::{ProjectileId, ProjectilePool};

/// Timers and multipliers for the automatic spawn modes.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    intensity: f32,
    power_multiplier: f32,
    since_ambient: f32,
    since_screen: f32,
    next_screen_interval: f32,
    ambient_enabled: bool,
    screen_enabled: bool,
}

impl SpawnScheduler {
    /// Non-finite settings fall back to 1.0.
    pub fn new(rng: &mut ChaCha8Rng, intensity: f32, power_multiplier: f32) -> Self {
        let mut scheduler = Self {
            intensity: 1.0,
            power_multiplier: 1.0,
            since_ambient: 0.0,
            since_screen: 0.0,
            next_screen_interval: roll_screen_interval(rng),
            ambient_enabled: true,
            screen_enabled: true,
        };
        scheduler.set_intensity(intensity);
        scheduler.set_power_multiplier(power_multiplier);
        scheduler
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Clamped to [MIN_INTENSITY, MAX_INTENSITY]. Non-finite values are ignored.
    pub fn set_intensity(&mut self, intensity: f32) {
        if !intensity.is_finite() {
            warn!(intensity, "intensity rejected, not a finite number");
            return;
        }
        self.intensity = intensity.clamp(MIN_INTENSITY, MAX_INTENSITY);
    }

    pub fn power_multiplier(&self) -> f32 {
        self.power_multiplier
    }

    /// Clamped to [MIN_POWER_MULTIPLIER, MAX_POWER_MULTIPLIER]. Non-finite values are ignored.
    pub fn set_power_multiplier(&mut self, multiplier: f32) {
        if !multiplier.is_finite() {
            warn!(multiplier, "power multiplier rejected, not a finite number");
            return;
        }
        self.power_multiplier = multiplier.clamp(MIN_POWER_MULTIPLIER, MAX_POWER_MULTIPLIER);
    }

    pub fn set_ambient_enabled(&mut self, enabled: bool) {
        self.ambient_enabled = enabled;
    }

    pub fn set_screen_enabled(&mut self, enabled: bool) {
        self.screen_enabled = enabled;
    }

    /// Seconds between ambient spawns at the current intensity.
    pub fn ambient_interval(&self) -> f32 {
        AMBIENT_BASE_INTERVAL_SECS / self.intensity
    }

    pub fn next_screen_interval(&self) -> f32 {
        self.next_screen_interval
    }
}

/// Advance the timers and spawn whatever is due. Returns the number launched.
pub fn run(
    scheduler: &mut SpawnScheduler,
    pool: &mut ProjectilePool,
    rng: &mut ChaCha8Rng,
    eye: Vec3,
    dt: f32,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut launched = 0;
    scheduler.since_ambient += dt;
    scheduler.since_screen += dt;

    // 1. Ambient shower
    if scheduler.ambient_enabled
        && scheduler.since_ambient > scheduler.ambient_interval()
        && pool.active_of_kind(SpawnKind::Ambient) < MAX_AMBIENT_ACTIVE
    {
        scheduler.since_ambient = 0.0;
        match spawn_ambient(pool, rng, scheduler.power_multiplier) {
            Some(id) => {
                launched += 1;
                events.push(SimEvent::ProjectileSpawned {
                    slot: id.0,
                    kind: SpawnKind::Ambient,
                });
            }
            None => events.push(SimEvent::SpawnDropped {
                kind: SpawnKind::Ambient,
            }),
        }
    }

    // 2. Screen-directed strike
    if scheduler.screen_enabled && scheduler.since_screen >= scheduler.next_screen_interval {
        scheduler.since_screen = 0.0;
        scheduler.next_screen_interval = roll_screen_interval(rng);
        match spawn_screen_directed(pool, rng, eye) {
            Some(id) => {
                launched += 1;
                events.push(SimEvent::ProjectileSpawned {
                    slot: id.0,
                    kind: SpawnKind::ScreenDirected,
                });
            }
            None => events.push(SimEvent::SpawnDropped {
                kind: SpawnKind::ScreenDirected,
            }),
        }
    }

    launched
}

/// Spawn one ambient projectile on the outer sphere, aimed near the origin.
pub fn spawn_ambient(
    pool: &mut ProjectilePool,
    rng: &mut ChaCha8Rng,
    power_multiplier: f32,
) -> Option<ProjectileId> {
    let theta = rng.gen_range(0.0..TAU);
    let phi = rng.gen_range(-1.0f32..1.0).acos();
    let position = AMBIENT_SPAWN_RADIUS
        * Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
    let aim = Vec3::new(
        rng.gen_range(-AMBIENT_AIM_JITTER..AMBIENT_AIM_JITTER),
        rng.gen_range(-AMBIENT_AIM_JITTER..AMBIENT_AIM_JITTER),
        rng.gen_range(-AMBIENT_AIM_JITTER..AMBIENT_AIM_JITTER),
    );
    let speed = rng.gen_range(AMBIENT_MIN_SPEED..AMBIENT_MAX_SPEED) * power_multiplier;
    let radius = roll_ambient_size(rng);

    let id = pool.activate(position, direction_to(position, aim) * speed, radius, SpawnKind::Ambient);
    match id {
        Some(id) => debug!(slot = id.0, radius, speed, "ambient projectile spawned"),
        None => debug!("ambient spawn dropped, pool exhausted"),
    }
    id
}

/// Launch a player-aimed projectile at the origin. Velocity and size scale
/// with `power`, which must lie in [0, 1].
pub fn spawn_aimed(
    pool: &mut ProjectilePool,
    rng: &mut ChaCha8Rng,
    power: f32,
) -> SimResult<ProjectileId> {
    if !(0.0..=1.0).contains(&power) {
        warn!(power, "aimed shot rejected, power out of range");
        return Err(SimError::InvalidPower(power));
    }
    if pool.idle_count() == 0 {
        warn!("aimed shot rejected, pool exhausted");
        return Err(SimError::PoolExhausted);
    }

    let position = Vec3::from_array(AIMED_LAUNCH_POSITION);
    let speed = AIMED_BASE_SPEED + power * AIMED_SPEED_GAIN;
    let radius = roll_aimed_size(rng) * (AIMED_SIZE_BASE + power * AIMED_SIZE_GAIN);
    let velocity = direction_to(position, Vec3::ZERO) * speed;

    let id = pool
        .activate(position, velocity, radius, SpawnKind::PlayerAimed)
        .ok_or(SimError::PoolExhausted)?;
    debug!(slot = id.0, power, speed, radius, "aimed projectile launched");
    Ok(id)
}

/// Spawn a slow, large projectile from a random template, aimed at the eye.
pub fn spawn_screen_directed(
    pool: &mut ProjectilePool,
    rng: &mut ChaCha8Rng,
    eye: Vec3,
) -> Option<ProjectileId> {
    let template = ScreenTemplate::ALL[rng.gen_range(0..ScreenTemplate::ALL.len())];
    let jitter = Vec3::new(
        rng.gen_range(-SCREEN_TEMPLATE_JITTER..SCREEN_TEMPLATE_JITTER),
        rng.gen_range(-SCREEN_TEMPLATE_JITTER..SCREEN_TEMPLATE_JITTER),
        rng.gen_range(-SCREEN_TEMPLATE_JITTER..SCREEN_TEMPLATE_JITTER),
    );
    let position = Vec3::from_array(template.origin()) + jitter;
    let velocity = direction_to(position, eye) * SCREEN_METEOR_SPEED;

    let id = pool.activate(position, velocity, SCREEN_METEOR_SIZE, SpawnKind::ScreenDirected);
    match id {
        Some(id) => debug!(slot = id.0, ?template, "screen-directed projectile spawned"),
        None => debug!(?template, "screen-directed spawn dropped, pool exhausted"),
    }
    id
}

fn roll_screen_interval(rng: &mut ChaCha8Rng) -> f32 {
    rng.gen_range(SCREEN_MIN_INTERVAL_SECS..=SCREEN_MAX_INTERVAL_SECS)
}

/// Mostly small, occasionally large.
fn roll_ambient_size(rng: &mut ChaCha8Rng) -> f32 {
    let roll: f32 = rng.gen();
    if roll < 0.70 {
        rng.gen_range(0.02..0.04)
    } else if roll < 0.95 {
        rng.gen_range(0.04..0.07)
    } else {
        rng.gen_range(0.07..0.10)
    }
}

fn roll_aimed_size(rng: &mut ChaCha8Rng) -> f32 {
    let roll: f32 = rng.gen();
    if roll < 0.5 {
        rng.gen_range(0.02..0.04)
    } else if roll < 0.8 {
        rng.gen_range(0.04..0.08)
    } else {
        rng.gen_range(0.08..MAX_SPAWN_SIZE)
    }
}
