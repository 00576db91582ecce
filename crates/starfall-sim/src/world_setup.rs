//! Scene setup: the player craft and the default enemy roster.

use glam::Vec3;
use hecs::{Entity, World};

use starfall_core::components::*;
use starfall_core::constants::{AIMED_LAUNCH_POSITION, ENEMY_MAX_HP};
use starfall_core::enums::EnemyKind;
use starfall_core::health::Health;

/// Default enemy placements, all inside the player's lock window.
const DEFAULT_ROSTER: [(EnemyKind, [f32; 3]); 3] = [
    (EnemyKind::Attacker, [0.8, 0.5, 1.0]),
    (EnemyKind::Attacker, [-2.5, 1.0, -1.5]),
    (EnemyKind::Scout, [3.0, -0.5, -2.0]),
];

pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((PlayerCraft, Position(Vec3::from_array(AIMED_LAUNCH_POSITION))))
}

pub fn spawn_enemy(world: &mut World, id: u32, kind: EnemyKind, position: Vec3) -> Entity {
    world.spawn((
        Enemy,
        EnemyTag { id, kind },
        Position(position),
        Health::new(ENEMY_MAX_HP),
    ))
}

/// Spawn the default roster, assigning ids from `next_id`.
pub fn spawn_default_enemies(world: &mut World, next_id: &mut u32) {
    for (kind, position) in DEFAULT_ROSTER {
        spawn_enemy(world, *next_id, kind, Vec3::from_array(position));
        *next_id += 1;
    }
}
