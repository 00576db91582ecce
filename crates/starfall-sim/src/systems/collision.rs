//! Collision resolution for falling projectiles.
//!
//! Each FALLING projectile is tested once per tick against the targets in
//! priority order (shield, central body, orbiting body); the first match
//! wins. Screen-directed projectiles skip the targets and are tested
//! against the camera eye instead.

use tracing::info;

use starfall_core::constants::{SCREEN_CRACK_INTENSITY, SCREEN_PROXIMITY};
use starfall_core::enums::{ImpactSource, SpawnKind, TargetKind};
use starfall_core::events::SimEvent;
use starfall_core::health::DamageOutcome;
use starfall_core::types::CameraView;

use crate::pool::ProjectilePool;
use crate::projector;
use crate::scoring::{ComboTracker, ImpactScore};
use crate::targets::TargetSet;

/// What this pass changed, for the persistence scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    pub hits: u32,
    pub screen_cracks: u32,
    pub body_destroyed: bool,
}

impl CollisionSummary {
    pub fn progress_changed(&self) -> bool {
        self.hits > 0
    }
}

pub fn run(
    pool: &mut ProjectilePool,
    targets: &mut TargetSet,
    combo: &mut ComboTracker,
    camera: &CameraView,
    now: f32,
    events: &mut Vec<SimEvent>,
) -> CollisionSummary {
    let mut summary = CollisionSummary::default();

    for id in pool.falling_ids() {
        let Some(projectile) = pool.get(id) else {
            continue;
        };
        let position = projectile.position;
        let radius = projectile.radius;

        if projectile.kind == SpawnKind::ScreenDirected {
            if position.distance(camera.eye) < SCREEN_PROXIMITY {
                pool.retire(id);
                summary.screen_cracks += 1;
                events.push(SimEvent::ScreenCrack {
                    point: projector::screen_directed_point(position),
                    intensity: SCREEN_CRACK_INTENSITY,
                });
            }
            continue;
        }

        let Some(kind) = targets.first_hit(position, radius) else {
            continue;
        };
        if !pool.impact(id) {
            continue;
        }
        let intensity = projector::hit_intensity(kind, radius);
        let screen = projector::project(&camera.view_projection, position);

        match kind {
            TargetKind::Shield => {
                let outcome = targets.shield.register_hit(position);
                push_combo(combo.register_impact(now, ImpactSource::Shield), events);
                events.push(SimEvent::ShieldHit {
                    position,
                    hp: targets.shield.health.current(),
                    intensity,
                });
                events.push(SimEvent::ScreenImpact {
                    point: screen,
                    intensity,
                });
                if outcome == DamageOutcome::Destroyed {
                    info!("shield destroyed");
                    events.push(SimEvent::ShieldDestroyed);
                }
                summary.hits += 1;
            }
            TargetKind::CentralBody => {
                let outcome = targets.body.health.damage();
                push_combo(combo.register_impact(now, ImpactSource::CentralBody), events);
                events.push(SimEvent::BodyHit {
                    position,
                    hp: targets.body.health.current(),
                    intensity,
                });
                events.push(SimEvent::ScreenImpact {
                    point: screen,
                    intensity,
                });
                if outcome == DamageOutcome::Destroyed {
                    let bonus = combo.on_target_destroyed();
                    info!(bonus, total = combo.total_score(), "central body destroyed");
                    events.push(SimEvent::BodyDestroyed { bonus });
                    summary.body_destroyed = true;
                }
                summary.hits += 1;
            }
            TargetKind::OrbitingBody => {
                events.push(SimEvent::OrbiterHit {
                    position,
                    intensity,
                });
            }
        }
    }

    summary
}

/// Translate a combo result into events.
pub fn push_combo(score: ImpactScore, events: &mut Vec<SimEvent>) {
    if let Some(combo) = score.expired_combo {
        events.push(SimEvent::ComboExpired { combo });
    }
    events.push(SimEvent::ComboImpact {
        combo: score.combo,
        points: score.points,
    });
}
