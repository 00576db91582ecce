//! The persisted progress record and its reconciliation rule.

use serde::{Deserialize, Serialize};

use starfall_core::constants::{BODY_MAX_HP, SHIELD_MAX_HP};

/// Everything that survives a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub body_hp: u32,
    pub shield_hp: u32,
    pub destroyed_targets: u32,
    pub total_score: u64,
    #[serde(default)]
    pub max_combo: u32,
    #[serde(default)]
    pub total_impacts: u64,
    #[serde(default)]
    pub projectiles_launched: u64,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            body_hp: BODY_MAX_HP,
            shield_hp: SHIELD_MAX_HP,
            destroyed_targets: 0,
            total_score: 0,
            max_combo: 0,
            total_impacts: 0,
            projectiles_launched: 0,
        }
    }
}

/// Merge two records field by field; whichever side made more progress wins.
///
/// Lower HP counts as more progress. Counters and score take the maximum.
pub fn reconcile(local: &ProgressSnapshot, remote: &ProgressSnapshot) -> ProgressSnapshot {
    ProgressSnapshot {
        body_hp: local.body_hp.min(remote.body_hp),
        shield_hp: local.shield_hp.min(remote.shield_hp),
        destroyed_targets: local.destroyed_targets.max(remote.destroyed_targets),
        total_score: local.total_score.max(remote.total_score),
        max_combo: local.max_combo.max(remote.max_combo),
        total_impacts: local.total_impacts.max(remote.total_impacts),
        projectiles_launched: local.projectiles_launched.max(remote.projectiles_launched),
    }
}
