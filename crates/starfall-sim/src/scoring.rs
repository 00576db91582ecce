//! Combo and score tracking.
//!
//! Times are simulation seconds supplied by the caller, so the tracker is
//! deterministic and testable without a clock.

use starfall_core::constants::*;
use starfall_core::enums::ImpactSource;
use starfall_core::state::ComboView;
use starfall_persist::ProgressSnapshot;

/// Result of one qualifying impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactScore {
    /// Combo after this impact (0 while cooling down).
    pub combo: u32,
    pub points: u64,
    /// Set when this impact pushed a combo past the duration ceiling.
    pub expired_combo: Option<u32>,
}

/// Combo state change observed by `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboChange {
    /// Timed out between impacts.
    Ended { combo: u32 },
    /// Hit the duration ceiling; cooldown started.
    Expired { combo: u32 },
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpactStats {
    pub total_impacts: u64,
    pub shield_impacts: u64,
    pub body_impacts: u64,
    pub special_hits: u64,
    pub projectiles_launched: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    combo: u32,
    max_combo: u32,
    combo_start: f32,
    last_impact: f32,
    cooldown_until: Option<f32>,
    total_score: u64,
    destroyed_targets: u32,
    stats: ImpactStats,
}

/// Points for one impact at the given combo.
pub fn points_for(combo: u32) -> u64 {
    if combo >= COMBO_TIER_HIGH {
        POINTS_TIER_HIGH
    } else if combo >= COMBO_TIER_MID {
        POINTS_TIER_MID
    } else {
        POINTS_BASE
    }
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn destroyed_targets(&self) -> u32 {
        self.destroyed_targets
    }

    pub fn stats(&self) -> ImpactStats {
        self.stats
    }

    pub fn in_cooldown(&self, now: f32) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    /// Count one qualifying impact at time `now` and award its points.
    pub fn register_impact(&mut self, now: f32, source: ImpactSource) -> ImpactScore {
        self.stats.total_impacts += 1;
        match source {
            ImpactSource::Shield => self.stats.shield_impacts += 1,
            ImpactSource::CentralBody => self.stats.body_impacts += 1,
            ImpactSource::SpecialWeapon => self.stats.special_hits += 1,
        }

        if let Some(until) = self.cooldown_until {
            if now < until {
                self.last_impact = now;
                return self.award_base(None);
            }
            self.cooldown_until = None;
        }

        if self.combo > 0 && now - self.last_impact <= COMBO_TIMEOUT_SECS {
            if now - self.combo_start > MAX_COMBO_DURATION_SECS {
                let expired = self.combo;
                self.force_expire(now);
                self.last_impact = now;
                return self.award_base(Some(expired));
            }
            self.combo += 1;
        } else {
            self.combo = 1;
            self.combo_start = now;
        }

        self.last_impact = now;
        self.max_combo = self.max_combo.max(self.combo);
        let points = points_for(self.combo);
        self.total_score += points;
        ImpactScore {
            combo: self.combo,
            points,
            expired_combo: None,
        }
    }

    fn award_base(&mut self, expired_combo: Option<u32>) -> ImpactScore {
        self.total_score += POINTS_BASE;
        ImpactScore {
            combo: 0,
            points: POINTS_BASE,
            expired_combo,
        }
    }

    fn force_expire(&mut self, now: f32) {
        self.combo = 0;
        self.cooldown_until = Some(now + COMBO_COOLDOWN_SECS);
    }

    /// Periodic maintenance: cooldown expiry, timeout decay, ceiling.
    pub fn tick(&mut self, now: f32) -> Option<ComboChange> {
        if self.cooldown_until.is_some_and(|until| now >= until) {
            self.cooldown_until = None;
        }
        if self.combo == 0 {
            return None;
        }
        let combo = self.combo;
        if now - self.last_impact > COMBO_TIMEOUT_SECS {
            self.combo = 0;
            return Some(ComboChange::Ended { combo });
        }
        if now - self.combo_start > MAX_COMBO_DURATION_SECS {
            self.force_expire(now);
            return Some(ComboChange::Expired { combo });
        }
        None
    }

    /// One-time bonus for destroying a target.
    pub fn on_target_destroyed(&mut self) -> u64 {
        self.destroyed_targets += 1;
        self.total_score += TARGET_DESTROYED_BONUS;
        TARGET_DESTROYED_BONUS
    }

    pub fn record_launch(&mut self) {
        self.stats.projectiles_launched += 1;
    }

    /// Adopt persisted counters. Never lowers anything already earned.
    pub fn restore(&mut self, progress: &ProgressSnapshot) {
        self.total_score = self.total_score.max(progress.total_score);
        self.destroyed_targets = self.destroyed_targets.max(progress.destroyed_targets);
        self.max_combo = self.max_combo.max(progress.max_combo);
        self.stats.total_impacts = self.stats.total_impacts.max(progress.total_impacts);
        self.stats.projectiles_launched = self
            .stats
            .projectiles_launched
            .max(progress.projectiles_launched);
    }

    pub fn view(&self, now: f32) -> ComboView {
        ComboView {
            combo: self.combo,
            max_combo: self.max_combo,
            total_score: self.total_score,
            destroyed_targets: self.destroyed_targets,
            in_cooldown: self.in_cooldown(now),
        }
    }
}
