//! Targeting system: feeds live enemies to the lock-on state machine and
//! turns its transitions into events.

use glam::Vec3;
use hecs::{Entity, World};

use starfall_core::components::*;
use starfall_core::events::SimEvent;
use starfall_core::health::Health;
use starfall_core::types::CameraView;
use starfall_lockon::fsm::{LockOn, LockTransition};
use starfall_lockon::scoring::{Candidate, LockOrigin};

use crate::projector;
use crate::systems::enemies;

/// Player craft position, or the aimed-shot launch point if there is none.
pub fn player_position(world: &World) -> Vec3 {
    world
        .query::<(&PlayerCraft, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.0)
        .unwrap_or_else(|| Vec3::from_array(starfall_core::constants::AIMED_LAUNCH_POSITION))
}

/// Every targetable enemy with its world and screen position.
/// Destroyed and invulnerable enemies are skipped.
pub fn candidates(world: &World, camera: &CameraView) -> Vec<Candidate<Entity>> {
    world
        .query::<(&Enemy, &Position, &Health)>()
        .without::<&Invulnerable>()
        .iter()
        .filter(|(_, (_, _, health))| !health.is_destroyed())
        .map(|(entity, (_, pos, _))| Candidate {
            handle: entity,
            world: pos.0,
            screen: projector::project(&camera.view_projection, pos.0),
        })
        .collect()
}

/// Current candidate for one specific enemy, if it is targetable.
pub fn candidate_for(world: &World, camera: &CameraView, entity: Entity) -> Option<Candidate<Entity>> {
    if !enemies::is_targetable(world, entity) {
        return None;
    }
    let pos = world.get::<&Position>(entity).ok()?.0;
    Some(Candidate {
        handle: entity,
        world: pos,
        screen: projector::project(&camera.view_projection, pos),
    })
}

pub fn run(
    world: &World,
    lock: &mut LockOn<Entity>,
    camera: &CameraView,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    let origin = LockOrigin::facing_center(player_position(world));
    let candidates = candidates(world, camera);
    let mut transitions = Vec::new();
    lock.update(dt, &origin, &candidates, &mut transitions);

    for transition in transitions {
        let event = match transition {
            LockTransition::Acquired(entity) => {
                enemies::id_of(world, entity).map(|enemy_id| SimEvent::TargetAcquired { enemy_id })
            }
            LockTransition::Locked(entity) => {
                enemies::id_of(world, entity).map(|enemy_id| SimEvent::TargetLocked { enemy_id })
            }
            LockTransition::Lost(entity) => {
                enemies::id_of(world, entity).map(|enemy_id| SimEvent::TargetLost { enemy_id })
            }
            LockTransition::FiringEnded => None,
        };
        events.extend(event);
    }
}
