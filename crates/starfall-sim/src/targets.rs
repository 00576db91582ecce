//! Collision targets: the shield, the central body and the orbiting body.
//!
//! The set is closed, so collision resolution walks the three in fixed
//! priority order. Each implements `Targetable` for the containment test.

use glam::Vec3;

use starfall_core::constants::*;
use starfall_core::enums::TargetKind;
use starfall_core::health::{DamageOutcome, Health};
use starfall_core::state::ImpactView;
use starfall_core::types::direction_to;

/// Something a projectile can hit.
pub trait Targetable {
    fn kind(&self) -> TargetKind;
    fn center(&self) -> Vec3;
    /// Whether a projectile of `radius` at `point` is touching the target.
    fn contains(&self, point: Vec3, radius: f32) -> bool;
    /// Destroyed targets drop out of collision.
    fn is_collidable(&self) -> bool {
        true
    }
}

/// One recorded shield impact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactSlot {
    /// Unit-sphere position relative to the shield center.
    pub local_position: Vec3,
    pub intensity: f32,
}

/// Fixed-capacity ring of recent impacts. The newest entry overwrites the
/// oldest once full.
#[derive(Debug, Clone)]
pub struct ImpactRing<const N: usize> {
    slots: [ImpactSlot; N],
    head: usize,
}

impl<const N: usize> Default for ImpactRing<N> {
    fn default() -> Self {
        Self {
            slots: [ImpactSlot::default(); N],
            head: 0,
        }
    }
}

impl<const N: usize> ImpactRing<N> {
    pub fn record(&mut self, local_position: Vec3, intensity: f32) {
        if N == 0 {
            return;
        }
        self.slots[self.head] = ImpactSlot {
            local_position,
            intensity,
        };
        self.head = (self.head + 1) % N;
    }

    /// Fade every slot by `rate * dt`.
    pub fn fade(&mut self, dt: f32, rate: f32) {
        for slot in &mut self.slots {
            slot.intensity = (slot.intensity - dt * rate).max(0.0);
        }
    }

    /// Slots that still have visible intensity.
    pub fn live(&self) -> impl Iterator<Item = &ImpactSlot> {
        self.slots.iter().filter(|s| s.intensity > 0.0)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub struct Shield {
    pub center: Vec3,
    pub radius: f32,
    pub health: Health,
    pub impacts: ImpactRing<SHIELD_IMPACT_SLOTS>,
}

impl Shield {
    pub fn new(max_hp: u32) -> Self {
        Self {
            center: Vec3::ZERO,
            radius: SHIELD_RADIUS,
            health: Health::new(max_hp),
            impacts: ImpactRing::default(),
        }
    }

    /// Apply one hit at `point`: HP -1 and a full-intensity ring entry.
    pub fn register_hit(&mut self, point: Vec3) -> DamageOutcome {
        let local = direction_to(self.center, point);
        self.impacts.record(local, 1.0);
        self.health.damage()
    }

    pub fn update(&mut self, dt: f32) {
        self.impacts.fade(dt, SHIELD_IMPACT_FADE_RATE);
    }

    pub fn impact_views(&self) -> Vec<ImpactView> {
        self.impacts
            .live()
            .map(|s| ImpactView {
                local_position: s.local_position,
                intensity: s.intensity,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.health.reset();
        self.impacts.clear();
    }
}

impl Targetable for Shield {
    fn kind(&self) -> TargetKind {
        TargetKind::Shield
    }

    fn center(&self) -> Vec3 {
        self.center
    }

    fn contains(&self, point: Vec3, _radius: f32) -> bool {
        point.distance(self.center) <= self.radius
    }

    fn is_collidable(&self) -> bool {
        !self.health.is_destroyed()
    }
}

#[derive(Debug, Clone)]
pub struct CentralBody {
    pub radius: f32,
    pub health: Health,
}

impl CentralBody {
    pub fn new(max_hp: u32) -> Self {
        Self {
            radius: BODY_RADIUS,
            health: Health::new(max_hp),
        }
    }
}

impl Targetable for CentralBody {
    fn kind(&self) -> TargetKind {
        TargetKind::CentralBody
    }

    fn center(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn contains(&self, point: Vec3, _radius: f32) -> bool {
        point.length() <= self.radius
    }

    fn is_collidable(&self) -> bool {
        !self.health.is_destroyed()
    }
}

/// Decorative body on a circular orbit in the XZ plane.
#[derive(Debug, Clone)]
pub struct OrbitingBody {
    pub orbit_radius: f32,
    pub angular_speed: f32,
    pub angle: f32,
    pub radius: f32,
}

impl Default for OrbitingBody {
    fn default() -> Self {
        Self {
            orbit_radius: ORBITER_ORBIT_RADIUS,
            angular_speed: ORBITER_ANGULAR_SPEED,
            angle: 0.0,
            radius: ORBITER_RADIUS,
        }
    }
}

impl OrbitingBody {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.orbit_radius * self.angle.cos(),
            0.0,
            self.orbit_radius * self.angle.sin(),
        )
    }

    pub fn update(&mut self, dt: f32) {
        self.angle = (self.angle + self.angular_speed * dt).rem_euclid(std::f32::consts::TAU);
    }
}

impl Targetable for OrbitingBody {
    fn kind(&self) -> TargetKind {
        TargetKind::OrbitingBody
    }

    fn center(&self) -> Vec3 {
        self.position()
    }

    fn contains(&self, point: Vec3, radius: f32) -> bool {
        point.distance(self.position()) < radius + self.radius
    }
}

/// All collision targets in the scene.
#[derive(Debug, Clone)]
pub struct TargetSet {
    pub shield: Shield,
    pub body: CentralBody,
    pub orbiter: OrbitingBody,
}

impl TargetSet {
    pub fn new(shield_hp: u32, body_hp: u32) -> Self {
        Self {
            shield: Shield::new(shield_hp),
            body: CentralBody::new(body_hp),
            orbiter: OrbitingBody::default(),
        }
    }

    /// First target containing the point, in priority order.
    pub fn first_hit(&self, point: Vec3, radius: f32) -> Option<TargetKind> {
        let ordered: [&dyn Targetable; 3] = [&self.shield, &self.body, &self.orbiter];
        ordered
            .iter()
            .find(|t| t.is_collidable() && t.contains(point, radius))
            .map(|t| t.kind())
    }

    /// Advance visual state (ring fade, orbit).
    pub fn update(&mut self, dt: f32) {
        self.shield.update(dt);
        self.orbiter.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_overwrites_oldest() {
        let mut ring: ImpactRing<2> = ImpactRing::default();
        ring.record(Vec3::X, 1.0);
        ring.record(Vec3::Y, 1.0);
        ring.record(Vec3::Z, 1.0);
        let positions: Vec<Vec3> = ring.live().map(|s| s.local_position).collect();
        assert!(positions.contains(&Vec3::Z));
        assert!(positions.contains(&Vec3::Y));
        assert!(!positions.contains(&Vec3::X));
    }

    #[test]
    fn test_ring_fades() {
        let mut ring: ImpactRing<4> = ImpactRing::default();
        ring.record(Vec3::X, 1.0);
        ring.fade(0.5, SHIELD_IMPACT_FADE_RATE);
        assert!((ring.live().next().unwrap().intensity - 0.25).abs() < 1e-5);
        ring.fade(1.0, SHIELD_IMPACT_FADE_RATE);
        assert_eq!(ring.live().count(), 0);
    }

    #[test]
    fn test_shield_hit_records_normalized_direction() {
        let mut shield = Shield::new(5);
        shield.register_hit(Vec3::new(0.0, 1.1, 0.0));
        let slot = shield.impacts.live().next().unwrap();
        assert!((slot.local_position - Vec3::Y).length() < 1e-5);
        assert_eq!(shield.health.current(), 4);
    }

    #[test]
    fn test_priority_prefers_shield_over_body() {
        let targets = TargetSet::new(5, 5);
        assert_eq!(targets.first_hit(Vec3::new(0.1, 0.0, 0.0), 0.05), Some(TargetKind::Shield));
    }

    #[test]
    fn test_destroyed_shield_exposes_body() {
        let mut targets = TargetSet::new(1, 5);
        targets.shield.register_hit(Vec3::X);
        assert!(targets.shield.health.is_destroyed());
        assert_eq!(targets.first_hit(Vec3::new(0.1, 0.0, 0.0), 0.05), Some(TargetKind::CentralBody));
        assert_eq!(targets.first_hit(Vec3::new(0.9, 0.0, 0.0), 0.05), None);
    }

    #[test]
    fn test_orbiter_moves_and_contains() {
        let mut targets = TargetSet::new(1, 1);
        let start = targets.orbiter.position();
        assert_eq!(targets.first_hit(start, 0.05), Some(TargetKind::OrbitingBody));
        targets.update(1.0);
        assert!(targets.orbiter.position().distance(start) > 0.1);
    }
}
