//! Special weapon timeline: CHARGING -> TRAVELING -> IMPACT -> INACTIVE.
//!
//! The controller only drives the visual beam. Damage and cooldown are the
//! engine's business, applied at fire time and on completion respectively.

use glam::Vec3;

use starfall_core::constants::*;
use starfall_core::enums::{FireRejection, WeaponPhase};
use starfall_core::state::WeaponView;

/// Reported by `update` when the timeline finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponEvent {
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct WeaponController {
    phase: WeaponPhase,
    elapsed: f32,
    source: Vec3,
    target: Vec3,
    beam_front: Vec3,
}

fn phase_duration(phase: WeaponPhase) -> f32 {
    match phase {
        WeaponPhase::Inactive => 0.0,
        WeaponPhase::Charging => WEAPON_CHARGE_SECS,
        WeaponPhase::Traveling => WEAPON_TRAVEL_SECS,
        WeaponPhase::Impact => WEAPON_IMPACT_SECS,
    }
}

fn next_phase(phase: WeaponPhase) -> WeaponPhase {
    match phase {
        WeaponPhase::Charging => WeaponPhase::Traveling,
        WeaponPhase::Traveling => WeaponPhase::Impact,
        WeaponPhase::Impact | WeaponPhase::Inactive => WeaponPhase::Inactive,
    }
}

impl WeaponController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> WeaponPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == WeaponPhase::Inactive
    }

    /// Progress through the current phase (0.0 - 1.0).
    pub fn phase_progress(&self) -> f32 {
        let duration = phase_duration(self.phase);
        if duration > 0.0 {
            (self.elapsed / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn beam_front(&self) -> Vec3 {
        self.beam_front
    }

    /// Start the timeline. Rejected while a previous shot is still running.
    pub fn fire(&mut self, source: Vec3, target: Vec3) -> Result<(), FireRejection> {
        if !self.is_idle() {
            return Err(FireRejection::WeaponBusy);
        }
        self.phase = WeaponPhase::Charging;
        self.elapsed = 0.0;
        self.source = source;
        self.target = target;
        self.beam_front = source;
        Ok(())
    }

    /// Advance by `dt`. The source follows `source_now` while charging.
    pub fn update(&mut self, dt: f32, source_now: Vec3) -> Option<WeaponEvent> {
        if self.is_idle() {
            return None;
        }
        self.elapsed += dt;
        while self.elapsed >= phase_duration(self.phase) {
            self.elapsed -= phase_duration(self.phase);
            self.phase = next_phase(self.phase);
            if self.is_idle() {
                self.elapsed = 0.0;
                self.beam_front = self.target;
                return Some(WeaponEvent::Completed);
            }
        }

        match self.phase {
            WeaponPhase::Charging => {
                self.source = source_now;
                self.beam_front = source_now;
            }
            WeaponPhase::Traveling => {
                self.beam_front = self.source.lerp(self.target, self.phase_progress());
            }
            WeaponPhase::Impact | WeaponPhase::Inactive => {
                self.beam_front = self.target;
            }
        }
        None
    }

    pub fn view(&self) -> WeaponView {
        WeaponView {
            phase: self.phase,
            phase_progress: self.phase_progress(),
            source: self.source,
            beam_front: self.beam_front,
            target: self.target,
        }
    }
}
