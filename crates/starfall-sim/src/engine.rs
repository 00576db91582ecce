//! Simulation engine: the core of the scene.
//!
//! `SimulationEngine` owns the hecs world (player craft and enemies), the
//! projectile pool, the collision targets, lock-on, weapon and scoring state.
//! It processes queued commands, runs all systems in a fixed order and
//! produces `SimSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use starfall_core::commands::PlayerCommand;
use starfall_core::components::{PlayerCraft, Position};
use starfall_core::constants::*;
use starfall_core::enums::{EnemyKind, FireRejection, ImpactSource, RunState, SpawnKind};
use starfall_core::error::{SimError, SimResult};
use starfall_core::events::SimEvent;
use starfall_core::state::SimSnapshot;
use starfall_core::types::{CameraView, ScreenPoint, SimTime};
use starfall_lockon::fsm::LockOn;
use starfall_lockon::scoring::pick_by_screen;
use starfall_persist::{reconcile, LocalStore, ProgressSnapshot, RemoteLink};

use crate::pool::{ProjectileId, ProjectilePool};
use crate::scoring::{ComboChange, ComboTracker};
use crate::systems;
use crate::systems::collision::push_combo;
use crate::systems::enemies;
use crate::systems::snapshot::SnapshotSources;
use crate::systems::spawner::{self, SpawnScheduler};
use crate::systems::sync::ProgressSync;
use crate::systems::targeting;
use crate::targets::TargetSet;
use crate::weapon::{WeaponController, WeaponEvent};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub pool_capacity: usize,
    /// Ambient spawn rate multiplier.
    pub intensity: f32,
    /// Ambient speed multiplier.
    pub power_multiplier: f32,
    pub shield_hp: u32,
    pub body_hp: u32,
    pub ambient_spawns: bool,
    pub screen_directed_spawns: bool,
    /// Spawn the default enemy roster at startup.
    pub default_enemies: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool_capacity: POOL_CAPACITY,
            intensity: 1.0,
            power_multiplier: 1.0,
            shield_hp: SHIELD_MAX_HP,
            body_hp: BODY_MAX_HP,
            ambient_spawns: true,
            screen_directed_spawns: true,
            default_enemies: true,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    run_state: RunState,
    rng: ChaCha8Rng,
    camera: CameraView,
    pool: ProjectilePool,
    spawner: SpawnScheduler,
    targets: TargetSet,
    lock: LockOn<Entity>,
    weapon: WeaponController,
    combo: ComboTracker,
    sync: ProgressSync,
    next_enemy_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    entity_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut spawner = SpawnScheduler::new(&mut rng, config.intensity, config.power_multiplier);
        spawner.set_ambient_enabled(config.ambient_spawns);
        spawner.set_screen_enabled(config.screen_directed_spawns);

        let mut world = World::new();
        let mut next_enemy_id = 1;
        world_setup::spawn_player(&mut world);
        if config.default_enemies {
            world_setup::spawn_default_enemies(&mut world, &mut next_enemy_id);
        }

        Self {
            world,
            time: SimTime::default(),
            run_state: RunState::Running,
            rng,
            camera: CameraView::default(),
            pool: ProjectilePool::new(config.pool_capacity),
            spawner,
            targets: TargetSet::new(config.shield_hp, config.body_hp),
            lock: LockOn::new(),
            weapon: WeaponController::new(),
            combo: ComboTracker::new(),
            sync: ProgressSync::default(),
            next_enemy_id,
            command_queue: VecDeque::new(),
            entity_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Create an engine backed by a local store and an optional remote link.
    ///
    /// Saved local progress is applied immediately; a remote pull is
    /// requested and reconciled once it arrives.
    pub fn with_persistence(
        config: SimConfig,
        local: Box<dyn LocalStore>,
        remote: Option<RemoteLink>,
    ) -> Self {
        let mut engine = Self::new(config);
        engine.sync = ProgressSync::new(local, remote);
        if let Some(saved) = engine.sync.load_local() {
            info!(score = saved.total_score, body_hp = saved.body_hp, "local progress loaded");
            engine.apply_progress(&saved);
        }
        engine.sync.request_pull();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> SimSnapshot {
        let dt = sanitize_dt(dt);
        self.process_commands();
        self.apply_remote_progress();

        if self.run_state == RunState::Running {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &SnapshotSources {
                world: &self.world,
                time: self.time,
                run_state: self.run_state,
                pool: &self.pool,
                targets: &self.targets,
                lock: &self.lock,
                weapon: &self.weapon,
                combo: &self.combo,
            },
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pool(&self) -> &ProjectilePool {
        &self.pool
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    pub fn lock(&self) -> &LockOn<Entity> {
        &self.lock
    }

    pub fn weapon(&self) -> &WeaponController {
        &self.weapon
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }

    // --- Host world feed ---

    pub fn set_camera(&mut self, camera: CameraView) {
        self.camera = camera;
    }

    pub fn move_player(&mut self, position: Vec3) {
        for (_entity, (_player, pos)) in self.world.query_mut::<(&PlayerCraft, &mut Position)>() {
            pos.0 = position;
        }
    }

    /// Add an enemy and return its id.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec3) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        world_setup::spawn_enemy(&mut self.world, id, kind, position);
        id
    }

    pub fn move_enemy(&mut self, enemy_id: u32, position: Vec3) -> SimResult<()> {
        let entity =
            enemies::find_by_id(&self.world, enemy_id).ok_or(SimError::UnknownEnemy(enemy_id))?;
        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            pos.0 = position;
        }
        Ok(())
    }

    // --- Player actions ---

    /// Launch a player-aimed projectile.
    pub fn aimed_shot(&mut self, power: f32) -> SimResult<ProjectileId> {
        match spawner::spawn_aimed(&mut self.pool, &mut self.rng, power) {
            Ok(id) => {
                self.combo.record_launch();
                self.sync.mark_dirty();
                self.events.push(SimEvent::ProjectileSpawned {
                    slot: id.0,
                    kind: SpawnKind::PlayerAimed,
                });
                Ok(id)
            }
            Err(e) => {
                if e == SimError::PoolExhausted {
                    self.events.push(SimEvent::SpawnDropped {
                        kind: SpawnKind::PlayerAimed,
                    });
                }
                Err(e)
            }
        }
    }

    /// Lock an enemy by id, skipping the search phase.
    pub fn set_manual_target(&mut self, enemy_id: u32) -> SimResult<()> {
        let entity =
            enemies::find_by_id(&self.world, enemy_id).ok_or(SimError::UnknownEnemy(enemy_id))?;
        if enemies::is_invulnerable(&self.world, entity) {
            return Err(SimError::EnemyInvulnerable(enemy_id));
        }
        let candidate = targeting::candidate_for(&self.world, &self.camera, entity)
            .ok_or(SimError::EnemyDestroyed(enemy_id))?;
        self.lock.set_manual(candidate);
        self.events.push(SimEvent::TargetLocked { enemy_id });
        Ok(())
    }

    /// A tap on the locked target fires; any other tap picks the nearest enemy.
    pub fn tap_screen(&mut self, point: ScreenPoint) {
        if self.lock.is_tap_on_target(point) {
            // Rejections are logged and reported as events.
            let _ = self.fire_special();
            return;
        }
        let candidates = targeting::candidates(&self.world, &self.camera);
        if let Some(candidate) = pick_by_screen(point, &candidates).copied() {
            self.lock.set_manual(candidate);
            if let Some(enemy_id) = enemies::id_of(&self.world, candidate.handle) {
                self.events.push(SimEvent::TargetLocked { enemy_id });
            }
        }
    }

    /// Fire the special weapon at the locked target.
    ///
    /// Damage is applied here, once, as `SPECIAL_DAMAGE_MULTIPLIER` hits.
    /// The beam timeline that follows is visual.
    pub fn fire_special(&mut self) -> SimResult<u32> {
        let entity = match self.lock.check_fire() {
            Ok(entity) => entity,
            Err(reason) => return self.reject_fire(reason),
        };
        let Some(candidate) = targeting::candidate_for(&self.world, &self.camera, entity) else {
            self.lock.clear();
            return self.reject_fire(FireRejection::TargetLost);
        };
        let Some(enemy_id) = enemies::id_of(&self.world, entity) else {
            self.lock.clear();
            return self.reject_fire(FireRejection::TargetLost);
        };
        if !self.weapon.is_idle() {
            return self.reject_fire(FireRejection::WeaponBusy);
        }
        if let Err(reason) = self.lock.try_fire() {
            return self.reject_fire(reason);
        }
        let source = targeting::player_position(&self.world);
        if let Err(reason) = self.weapon.fire(source, candidate.world) {
            return self.reject_fire(reason);
        }

        enemies::damage(&mut self.world, entity, SPECIAL_DAMAGE_MULTIPLIER, &mut self.events);
        info!(enemy_id, "special weapon fired");
        self.events.push(SimEvent::SpecialFired {
            enemy_id,
            hits: SPECIAL_DAMAGE_MULTIPLIER,
        });
        Ok(enemy_id)
    }

    fn reject_fire(&mut self, reason: FireRejection) -> SimResult<u32> {
        warn!(?reason, "special weapon fire rejected");
        self.events.push(SimEvent::FireRejected { reason });
        Err(SimError::FireRejected(reason))
    }

    // --- Progress ---

    /// The persisted view of current progress.
    pub fn progress(&self) -> ProgressSnapshot {
        let stats = self.combo.stats();
        ProgressSnapshot {
            body_hp: self.targets.body.health.current(),
            shield_hp: self.targets.shield.health.current(),
            destroyed_targets: self.combo.destroyed_targets(),
            total_score: self.combo.total_score(),
            max_combo: self.combo.max_combo(),
            total_impacts: stats.total_impacts,
            projectiles_launched: stats.projectiles_launched,
        }
    }

    fn apply_progress(&mut self, progress: &ProgressSnapshot) {
        self.targets.body.health.restore(progress.body_hp);
        self.targets.shield.health.restore(progress.shield_hp);
        self.combo.restore(progress);
    }

    /// Write local progress immediately, e.g. on shutdown.
    pub fn save_progress(&mut self) {
        let progress = self.progress();
        self.sync.flush(progress);
    }

    /// Restore shield and central body to full HP. Score is kept.
    pub fn reset_progress(&mut self) {
        self.targets.shield.reset();
        self.targets.body.health.reset();
        self.sync.force_local();
        info!("targets reset");
    }

    fn apply_remote_progress(&mut self) {
        for remote in self.sync.poll_remote() {
            let merged = reconcile(&self.progress(), &remote);
            self.apply_progress(&merged);
            self.sync.force_local();
            info!(score = merged.total_score, "remote progress reconciled");
            self.events.push(SimEvent::ProgressReconciled);
        }
    }

    // --- Tick internals ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::AimedShot { power } => {
                let _ = self.aimed_shot(power);
            }
            PlayerCommand::SetIntensity { intensity } => {
                self.spawner.set_intensity(intensity);
            }
            PlayerCommand::SetPowerMultiplier { multiplier } => {
                self.spawner.set_power_multiplier(multiplier);
            }
            PlayerCommand::TapScreen { x, y } => {
                self.tap_screen(ScreenPoint::new(x, y));
            }
            PlayerCommand::TapEnemy { enemy_id } => {
                if let Err(e) = self.set_manual_target(enemy_id) {
                    warn!(error = %e, "manual target rejected");
                }
            }
            PlayerCommand::FireSpecial => {
                let _ = self.fire_special();
            }
            PlayerCommand::ResetProgress => self.reset_progress(),
            PlayerCommand::Pause => self.run_state = RunState::Paused,
            PlayerCommand::Resume => self.run_state = RunState::Running,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let now = self.time.now();

        // 1. Spawning
        let launched = systems::spawner::run(
            &mut self.spawner,
            &mut self.pool,
            &mut self.rng,
            self.camera.eye,
            dt,
            &mut self.events,
        );
        for _ in 0..launched {
            self.combo.record_launch();
        }
        // 2. Projectile motion and lifecycle
        self.pool.update(dt);
        // 3. Collision
        let summary = systems::collision::run(
            &mut self.pool,
            &mut self.targets,
            &mut self.combo,
            &self.camera,
            now,
            &mut self.events,
        );
        if summary.progress_changed() {
            self.sync.mark_dirty();
        }
        if summary.body_destroyed {
            self.sync.force_local();
        }
        // 4. Target visuals (ring fade, orbit)
        self.targets.update(dt);
        // 5. Enemy timers
        systems::enemies::run(&mut self.world, dt, &mut self.entity_buffer, &mut self.events);
        // 6. Targeting
        systems::targeting::run(&self.world, &mut self.lock, &self.camera, dt, &mut self.events);
        // 7. Special weapon timeline
        let source = targeting::player_position(&self.world);
        if let Some(WeaponEvent::Completed) = self.weapon.update(dt, source) {
            self.lock.start_cooldown(SPECIAL_WEAPON_COOLDOWN_SECS);
            push_combo(
                self.combo.register_impact(now, ImpactSource::SpecialWeapon),
                &mut self.events,
            );
            self.events.push(SimEvent::WeaponCompleted);
            self.sync.mark_dirty();
        }
        // 8. Combo maintenance
        match self.combo.tick(now) {
            Some(ComboChange::Ended { combo }) => self.events.push(SimEvent::ComboEnded { combo }),
            Some(ComboChange::Expired { combo }) => {
                self.events.push(SimEvent::ComboExpired { combo })
            }
            None => {}
        }
        // 9. Persistence throttle
        if self.sync.is_enabled() {
            let progress = self.progress();
            self.sync.tick(dt, progress);
        }
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_FRAME_DT)
    } else {
        0.0
    }
}
