//! Snapshot system: reads engine state and builds a `SimSnapshot`.
//!
//! Read-only; never modifies the world.

use hecs::{Entity, World};

use starfall_core::components::*;
use starfall_core::constants::SPECIAL_WEAPON_COOLDOWN_SECS;
use starfall_core::enums::RunState;
use starfall_core::events::SimEvent;
use starfall_core::health::Health;
use starfall_core::state::*;
use starfall_core::types::SimTime;
use starfall_lockon::fsm::LockOn;

use crate::pool::ProjectilePool;
use crate::scoring::ComboTracker;
use crate::systems::enemies;
use crate::targets::{TargetSet, Targetable};
use crate::weapon::WeaponController;

/// Borrowed view of everything the snapshot reads.
pub struct SnapshotSources<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub run_state: RunState,
    pub pool: &'a ProjectilePool,
    pub targets: &'a TargetSet,
    pub lock: &'a LockOn<Entity>,
    pub weapon: &'a WeaponController,
    pub combo: &'a ComboTracker,
}

pub fn build_snapshot(sources: &SnapshotSources<'_>, events: Vec<SimEvent>) -> SimSnapshot {
    SimSnapshot {
        time: sources.time,
        run_state: sources.run_state,
        projectiles: build_projectiles(sources.pool),
        shield: ShieldView {
            hp: sources.targets.shield.health.current(),
            max_hp: sources.targets.shield.health.max(),
            destroyed: sources.targets.shield.health.is_destroyed(),
            impacts: sources.targets.shield.impact_views(),
        },
        body: BodyView {
            hp: sources.targets.body.health.current(),
            max_hp: sources.targets.body.health.max(),
            destroyed: sources.targets.body.health.is_destroyed(),
        },
        orbiter_position: sources.targets.orbiter.center(),
        enemies: build_enemies(sources.world),
        targeting: build_targeting(sources.world, sources.lock),
        weapon: sources.weapon.view(),
        combo: sources.combo.view(sources.time.now()),
        events,
    }
}

fn build_projectiles(pool: &ProjectilePool) -> Vec<ProjectileView> {
    pool.iter_active()
        .map(|(id, p)| ProjectileView {
            slot: id.0,
            position: p.position,
            radius: p.radius,
            opacity: p.opacity,
            color: p.color,
            state: p.state,
            kind: p.kind,
        })
        .collect()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<EnemyView> = world
        .query::<(&EnemyTag, &Position, &Health, Option<&Invulnerable>)>()
        .iter()
        .map(|(_, (tag, pos, health, invulnerable))| EnemyView {
            enemy_id: tag.id,
            kind: tag.kind,
            position: pos.0,
            hp: health.current(),
            destroyed: health.is_destroyed(),
            invulnerable: invulnerable.is_some(),
        })
        .collect();
    views.sort_by_key(|v| v.enemy_id);
    views
}

fn build_targeting(world: &World, lock: &LockOn<Entity>) -> TargetingView {
    TargetingView {
        phase: lock.phase(),
        enemy_id: lock.target().and_then(|entity| enemies::id_of(world, entity)),
        progress: lock.progress(),
        screen_position: lock.target_screen(),
        cooldown_fraction: (lock.cooldown_remaining() / SPECIAL_WEAPON_COOLDOWN_SECS).clamp(0.0, 1.0),
    }
}
