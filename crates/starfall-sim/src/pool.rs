//! Fixed-capacity projectile pool.
//!
//! Slots are allocated once and recycled through a free list. A slot is
//! either on the free list (Idle) or active, never both, so
//! `active_count() + idle_count() == capacity()` holds at every tick.

use glam::Vec3;

use starfall_core::constants::*;
use starfall_core::enums::{ProjectileState, SpawnKind};

/// Slot index of a pooled projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileId(pub usize);

/// One pooled projectile. Every transient field is rewritten on activation.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub state: ProjectileState,
    pub kind: SpawnKind,
    /// Seconds since activation.
    pub lifetime: f32,
    /// Seconds since entering IMPACTING.
    pub impact_elapsed: f32,
    pub opacity: f32,
    pub color: [f32; 4],
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius: 0.0,
            state: ProjectileState::Idle,
            kind: SpawnKind::Ambient,
            lifetime: 0.0,
            impact_elapsed: 0.0,
            opacity: 0.0,
            color: [1.0; 4],
        }
    }
}

/// Base tint per spawn kind.
fn color_for(kind: SpawnKind) -> [f32; 4] {
    match kind {
        SpawnKind::Ambient => [1.0, 0.85, 0.6, 1.0],
        SpawnKind::PlayerAimed => [0.6, 0.85, 1.0, 1.0],
        SpawnKind::ScreenDirected => [1.0, 0.45, 0.3, 1.0],
    }
}

#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    free: Vec<usize>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Projectile::default(); capacity],
            // Reversed so slot 0 is handed out first.
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn idle_count(&self) -> usize {
        self.free.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Active projectiles of one spawn kind.
    pub fn active_of_kind(&self, kind: SpawnKind) -> usize {
        self.slots
            .iter()
            .filter(|p| p.state.is_active() && p.kind == kind)
            .count()
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.slots.get(id.0)
    }

    /// Active projectiles with their ids.
    pub fn iter_active(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.state.is_active())
            .map(|(i, p)| (ProjectileId(i), p))
    }

    /// Ids of every FALLING projectile, in slot order.
    pub fn falling_ids(&self) -> Vec<ProjectileId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.state == ProjectileState::Falling)
            .map(|(i, _)| ProjectileId(i))
            .collect()
    }

    /// Take a free slot and start it FALLING. `None` when the pool is exhausted.
    pub fn activate(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        radius: f32,
        kind: SpawnKind,
    ) -> Option<ProjectileId> {
        let index = self.free.pop()?;
        self.slots[index] = Projectile {
            position,
            velocity,
            radius,
            state: ProjectileState::Falling,
            kind,
            lifetime: 0.0,
            impact_elapsed: 0.0,
            opacity: 1.0,
            color: color_for(kind),
        };
        Some(ProjectileId(index))
    }

    /// FALLING -> IMPACTING. Any other state is left alone and returns false.
    pub fn impact(&mut self, id: ProjectileId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(p) if p.state == ProjectileState::Falling => {
                p.state = ProjectileState::Impacting;
                p.impact_elapsed = 0.0;
                p.velocity = Vec3::ZERO;
                true
            }
            _ => false,
        }
    }

    /// Return an active slot to the pool immediately.
    pub fn retire(&mut self, id: ProjectileId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(p) if p.state.is_active() => {
                p.state = ProjectileState::Idle;
                p.opacity = 0.0;
                self.free.push(id.0);
                true
            }
            _ => false,
        }
    }

    /// Integrate motion and advance every lifecycle timer by `dt`.
    pub fn update(&mut self, dt: f32) {
        for index in 0..self.slots.len() {
            let finished = {
                let p = &mut self.slots[index];
                match p.state {
                    ProjectileState::Idle => false,
                    ProjectileState::Falling => step_falling(p, dt),
                    ProjectileState::Impacting => {
                        step_impacting(p, dt);
                        false
                    }
                    ProjectileState::Fading => step_fading(p, dt),
                }
            };
            if finished {
                self.retire(ProjectileId(index));
            }
        }
    }
}

/// Returns true when the projectile left the play volume.
fn step_falling(p: &mut Projectile, dt: f32) -> bool {
    p.lifetime += dt;
    p.position += p.velocity * dt;

    let distance = p.position.length();
    if p.kind != SpawnKind::ScreenDirected && distance > INNER_BOUND {
        let toward_center = -p.position / distance;
        let accel = GRAVITY_K / (distance * distance);
        p.velocity += toward_center * accel * dt;
    }

    !(INNER_BOUND..=OUTER_BOUND).contains(&distance)
}

fn step_impacting(p: &mut Projectile, dt: f32) {
    p.lifetime += dt;
    p.impact_elapsed += dt;
    p.radius *= 1.0 + dt * IMPACT_GROWTH_RATE;
    p.opacity = (1.0 - p.impact_elapsed / IMPACT_DURATION_SECS).max(0.0);
    if p.impact_elapsed >= IMPACT_DURATION_SECS {
        p.state = ProjectileState::Fading;
    }
}

/// Returns true once fully transparent.
fn step_fading(p: &mut Projectile, dt: f32) -> bool {
    p.lifetime += dt;
    p.opacity -= dt * FADE_RATE;
    p.opacity <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_hands_out_slot_zero_first() {
        let mut pool = ProjectilePool::new(3);
        let id = pool.activate(Vec3::X * 5.0, Vec3::ZERO, 0.05, SpawnKind::Ambient);
        assert_eq!(id, Some(ProjectileId(0)));
    }

    #[test]
    fn test_impact_only_from_falling() {
        let mut pool = ProjectilePool::new(1);
        let id = pool
            .activate(Vec3::X * 5.0, Vec3::ZERO, 0.05, SpawnKind::Ambient)
            .unwrap();
        assert!(pool.impact(id));
        assert!(!pool.impact(id), "Second impact must be a no-op");
        assert_eq!(pool.get(id).unwrap().state, ProjectileState::Impacting);
    }

    #[test]
    fn test_impact_grows_then_fades_then_returns() {
        let mut pool = ProjectilePool::new(1);
        let id = pool
            .activate(Vec3::X * 5.0, Vec3::ZERO, 0.05, SpawnKind::Ambient)
            .unwrap();
        pool.impact(id);

        pool.update(0.25);
        let p = pool.get(id).unwrap();
        assert!(p.radius > 0.05);
        assert!((p.opacity - 0.5).abs() < 1e-4);

        pool.update(0.25);
        assert_eq!(pool.get(id).unwrap().state, ProjectileState::Fading);

        // Fading starts from the last impacting opacity (0.0) and clears at once.
        pool.update(0.1);
        assert_eq!(pool.get(id).unwrap().state, ProjectileState::Idle);
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_returns_to_pool() {
        let mut pool = ProjectilePool::new(1);
        pool.activate(Vec3::X * 19.9, Vec3::X * 10.0, 0.05, SpawnKind::Ambient);
        pool.update(0.1);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_central_pull_bends_velocity() {
        let mut pool = ProjectilePool::new(1);
        let id = pool
            .activate(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0.05, SpawnKind::Ambient)
            .unwrap();
        pool.update(0.1);
        assert!(pool.get(id).unwrap().velocity.x < 0.0);
    }

    #[test]
    fn test_screen_directed_ignores_pull() {
        let mut pool = ProjectilePool::new(1);
        let id = pool
            .activate(Vec3::new(2.0, 0.0, 0.0), Vec3::Z, 0.15, SpawnKind::ScreenDirected)
            .unwrap();
        pool.update(0.1);
        assert_eq!(pool.get(id).unwrap().velocity, Vec3::Z);
    }
}
