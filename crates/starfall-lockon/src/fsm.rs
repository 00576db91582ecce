//! Lock-on finite state machine.
//!
//! `LockOn` owns the phase, the tracked handle, lock progress, the lost-target
//! grace timer, the FIRING display timer and the weapon cooldown. The caller
//! supplies this tick's live candidates; nothing here touches the world.

use glam::Vec3;
use tracing::debug;

use starfall_core::constants::*;
use starfall_core::enums::{FireRejection, LockPhase};
use starfall_core::types::ScreenPoint;

use crate::scoring::{select_best, Candidate, LockOrigin};

/// Transitions reported by `update` and the manual/fire entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition<H> {
    /// A new target is being tracked; progress restarted.
    Acquired(H),
    /// Progress reached 1.0.
    Locked(H),
    /// The grace period ran out without the target reappearing.
    Lost(H),
    /// FIRING display finished; back to NO_TARGET.
    FiringEnded,
}

#[derive(Debug, Clone)]
pub struct LockOn<H> {
    phase: LockPhase,
    target: Option<H>,
    manual: bool,
    progress: f32,
    lost_secs: f32,
    firing_secs: f32,
    cooldown_secs: f32,
    target_world: Vec3,
    target_screen: ScreenPoint,
}

impl<H> Default for LockOn<H> {
    fn default() -> Self {
        Self {
            phase: LockPhase::NoTarget,
            target: None,
            manual: false,
            progress: 0.0,
            lost_secs: 0.0,
            firing_secs: 0.0,
            cooldown_secs: 0.0,
            target_world: Vec3::ZERO,
            target_screen: ScreenPoint::default(),
        }
    }
}

impl<H: Copy + Eq + std::fmt::Debug> LockOn<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    pub fn target(&self) -> Option<H> {
        self.target
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_secs
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Last known world position of the tracked target.
    pub fn target_world(&self) -> Vec3 {
        self.target_world
    }

    /// Last known screen position of the tracked target.
    pub fn target_screen(&self) -> ScreenPoint {
        self.target_screen
    }

    /// Advance timers and re-evaluate the target against this tick's candidates.
    pub fn update(
        &mut self,
        dt: f32,
        origin: &LockOrigin,
        candidates: &[Candidate<H>],
        transitions: &mut Vec<LockTransition<H>>,
    ) {
        self.cooldown_secs = (self.cooldown_secs - dt).max(0.0);

        if self.phase == LockPhase::Firing {
            self.firing_secs -= dt;
            if self.firing_secs <= 0.0 {
                self.clear();
                transitions.push(LockTransition::FiringEnded);
            }
            return;
        }

        if self.cooldown_secs > 0.0 {
            return;
        }

        // A manual target is held for as long as it stays alive.
        let held = if self.manual {
            self.target
                .and_then(|h| candidates.iter().find(|c| c.handle == h))
        } else {
            None
        };
        let best = held.or_else(|| select_best(origin, candidates)).copied();

        match best {
            Some(candidate) => self.track(dt, candidate, transitions),
            None => {
                if let Some(handle) = self.target {
                    self.lost_secs += dt;
                    if self.lost_secs >= LOCK_LOST_GRACE_SECS {
                        debug!(?handle, "lock lost");
                        self.clear();
                        transitions.push(LockTransition::Lost(handle));
                    }
                }
            }
        }
    }

    fn track(&mut self, dt: f32, candidate: Candidate<H>, transitions: &mut Vec<LockTransition<H>>) {
        if self.target != Some(candidate.handle) {
            self.target = Some(candidate.handle);
            self.manual = false;
            self.progress = 0.0;
            self.phase = LockPhase::Searching;
            transitions.push(LockTransition::Acquired(candidate.handle));
        }
        self.lost_secs = 0.0;
        self.target_world = candidate.world;
        self.target_screen = candidate.screen;

        if self.phase == LockPhase::Searching {
            self.progress += dt / LOCK_TIME_SECS;
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.phase = LockPhase::Locked;
                debug!(handle = ?candidate.handle, "lock acquired");
                transitions.push(LockTransition::Locked(candidate.handle));
            }
        }
    }

    /// Lock a target immediately, skipping the search.
    pub fn set_manual(&mut self, candidate: Candidate<H>) {
        self.target = Some(candidate.handle);
        self.manual = true;
        self.phase = LockPhase::Locked;
        self.progress = 1.0;
        self.lost_secs = 0.0;
        self.target_world = candidate.world;
        self.target_screen = candidate.screen;
    }

    /// Whether a tap lands on the locked target's screen position.
    pub fn is_tap_on_target(&self, tap: ScreenPoint) -> bool {
        self.phase == LockPhase::Locked
            && self.target_screen.distance_to(&tap) <= TOUCH_RADIUS + TOUCH_MARGIN
    }

    /// Check whether a fire request would be accepted, without committing.
    pub fn check_fire(&self) -> Result<H, FireRejection> {
        let handle = match (self.phase, self.target) {
            (LockPhase::Locked, Some(handle)) => handle,
            _ => return Err(FireRejection::NotLocked),
        };
        if self.cooldown_secs > 0.0 {
            return Err(FireRejection::CoolingDown);
        }
        Ok(handle)
    }

    fn commit_fire(&mut self) {
        self.phase = LockPhase::Firing;
        self.firing_secs = FIRING_DISPLAY_SECS;
        self.manual = false;
    }

    /// `check_fire`, then enter FIRING.
    pub fn try_fire(&mut self) -> Result<H, FireRejection> {
        let handle = self.check_fire()?;
        self.commit_fire();
        Ok(handle)
    }

    /// Block fire requests for `secs`.
    pub fn start_cooldown(&mut self, secs: f32) {
        self.cooldown_secs = secs.max(0.0);
    }

    /// Drop the current target and return to NO_TARGET.
    pub fn clear(&mut self) {
        self.phase = LockPhase::NoTarget;
        self.target = None;
        self.manual = false;
        self.progress = 0.0;
        self.lost_secs = 0.0;
        self.firing_secs = 0.0;
    }
}
