//! Saturating hit points shared by every damageable thing.

use serde::{Deserialize, Serialize};

/// Result of applying one point of damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// HP dropped but is still above zero.
    Damaged,
    /// This hit brought HP to zero. Reported once per life.
    Destroyed,
    /// Already at zero; nothing changed.
    AlreadyDestroyed,
}

/// Hit points. HP only rises through `reset` or `restore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
    destroyed: bool,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            destroyed: max == 0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Fraction of HP remaining (0.0 - 1.0).
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Remove one hit point.
    pub fn damage(&mut self) -> DamageOutcome {
        if self.destroyed {
            return DamageOutcome::AlreadyDestroyed;
        }
        self.current = self.current.saturating_sub(1);
        if self.current == 0 {
            self.destroyed = true;
            DamageOutcome::Destroyed
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Back to full HP.
    pub fn reset(&mut self) {
        *self = Self::new(self.max);
    }

    /// Set HP from a saved value, clamped to max.
    pub fn restore(&mut self, hp: u32) {
        self.current = hp.min(self.max);
        self.destroyed = self.current == 0;
    }
}
