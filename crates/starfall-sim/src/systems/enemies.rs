//! Enemy damage, destruction and respawn.
//!
//! Enemies are never despawned. A destroyed enemy carries a `Respawn`
//! countdown, returns at full HP, and is briefly `Invulnerable`.

use hecs::{Entity, World};
use tracing::info;

use starfall_core::components::*;
use starfall_core::constants::*;
use starfall_core::events::SimEvent;
use starfall_core::health::{DamageOutcome, Health};

/// Find an enemy entity by its public id.
pub fn find_by_id(world: &World, enemy_id: u32) -> Option<Entity> {
    world
        .query::<&EnemyTag>()
        .iter()
        .find(|(_, tag)| tag.id == enemy_id)
        .map(|(entity, _)| entity)
}

/// Public id of an enemy entity.
pub fn id_of(world: &World, entity: Entity) -> Option<u32> {
    world.get::<&EnemyTag>(entity).ok().map(|tag| tag.id)
}

/// Whether the entity is an enemy that can currently be targeted.
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|health| !health.is_destroyed())
        .unwrap_or(false)
}

pub fn is_invulnerable(world: &World, entity: Entity) -> bool {
    world.get::<&Invulnerable>(entity).is_ok()
}

/// Alive and not shielded by post-respawn invulnerability.
pub fn is_targetable(world: &World, entity: Entity) -> bool {
    is_alive(world, entity) && !is_invulnerable(world, entity)
}

/// Apply `hits` points of damage. Returns true if this destroyed the enemy.
pub fn damage(world: &mut World, entity: Entity, hits: u32, events: &mut Vec<SimEvent>) -> bool {
    if is_invulnerable(world, entity) {
        return false;
    }
    let Some(enemy_id) = id_of(world, entity) else {
        return false;
    };

    let mut destroyed = false;
    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        for _ in 0..hits {
            if health.damage() == DamageOutcome::Destroyed {
                destroyed = true;
            }
        }
    }

    if destroyed {
        info!(enemy_id, "enemy destroyed");
        let _ = world.insert_one(
            entity,
            Respawn {
                remaining_secs: ENEMY_RESPAWN_SECS,
            },
        );
        events.push(SimEvent::EnemyDestroyed { enemy_id });
    }
    destroyed
}

/// Count down respawn and invulnerability timers.
pub fn run(world: &mut World, dt: f32, buffer: &mut Vec<Entity>, events: &mut Vec<SimEvent>) {
    // 1. Invulnerability
    buffer.clear();
    for (entity, invulnerable) in world.query_mut::<&mut Invulnerable>() {
        invulnerable.remaining_secs -= dt;
        if invulnerable.remaining_secs <= 0.0 {
            buffer.push(entity);
        }
    }
    for &entity in buffer.iter() {
        let _ = world.remove_one::<Invulnerable>(entity);
    }

    // 2. Respawn countdown
    buffer.clear();
    for (entity, (respawn, health)) in world.query_mut::<(&mut Respawn, &mut Health)>() {
        respawn.remaining_secs -= dt;
        if respawn.remaining_secs <= 0.0 {
            health.reset();
            buffer.push(entity);
        }
    }
    for &entity in buffer.iter() {
        let _ = world.remove_one::<Respawn>(entity);
        let _ = world.insert_one(
            entity,
            Invulnerable {
                remaining_secs: RESPAWN_INVULNERABILITY_SECS,
            },
        );
        if let Some(enemy_id) = id_of(world, entity) {
            info!(enemy_id, "enemy respawned");
            events.push(SimEvent::EnemyRespawned { enemy_id });
        }
    }
}
