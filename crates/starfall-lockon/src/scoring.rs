//! Candidate scoring. Lower scores win.

use glam::Vec3;

use starfall_core::constants::*;
use starfall_core::types::ScreenPoint;

/// A lockable target as seen this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<H> {
    pub handle: H,
    pub world: Vec3,
    pub screen: ScreenPoint,
}

/// Where the player craft is and which way it faces on the horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockOrigin {
    pub position: Vec3,
    /// Heading in degrees, measured as `atan2(dx, dz)`.
    pub heading_deg: f32,
}

impl LockOrigin {
    /// Origin facing the world origin.
    pub fn facing_center(position: Vec3) -> Self {
        Self {
            position,
            heading_deg: horizontal_bearing_deg(position, Vec3::ZERO),
        }
    }
}

/// Horizontal bearing from `from` to `to` in degrees (-180, 180].
pub fn horizontal_bearing_deg(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    d.x.atan2(d.z).to_degrees()
}

/// Absolute difference between two bearings, folded into [0, 180].
pub fn angle_between_deg(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Score a target position, or `None` if it falls outside the lock window.
pub fn score(origin: &LockOrigin, target: Vec3) -> Option<f32> {
    let distance = origin.position.distance(target);
    if !(LOCK_MIN_DISTANCE..=LOCK_MAX_DISTANCE).contains(&distance) {
        return None;
    }
    let bearing = horizontal_bearing_deg(origin.position, target);
    let angle = angle_between_deg(bearing, origin.heading_deg);
    if angle > LOCK_ANGLE_DEG * LOCK_ANGLE_FILTER_FACTOR {
        return None;
    }
    Some(distance + angle * LOCK_ANGLE_WEIGHT)
}

/// Best-scoring candidate. Ties keep the earlier entry.
pub fn select_best<'a, H>(
    origin: &LockOrigin,
    candidates: &'a [Candidate<H>],
) -> Option<&'a Candidate<H>> {
    let mut best: Option<(&Candidate<H>, f32)> = None;
    for candidate in candidates {
        if let Some(s) = score(origin, candidate.world) {
            if best.map_or(true, |(_, best_score)| s < best_score) {
                best = Some((candidate, s));
            }
        }
    }
    best.map(|(c, _)| c)
}

/// Candidate nearest a tap in screen space, within the pick radius.
pub fn pick_by_screen<H>(tap: ScreenPoint, candidates: &[Candidate<H>]) -> Option<&Candidate<H>> {
    candidates
        .iter()
        .map(|c| (c, c.screen.distance_to(&tap)))
        .filter(|(_, d)| *d <= TAP_PICK_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}
