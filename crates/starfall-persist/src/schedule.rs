//! Throttle for local and remote writes.

use starfall_core::constants::{LOCAL_SAVE_INTERVAL_SECS, REMOTE_SYNC_INTERVAL_SECS};

/// Which writes are due this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncDue {
    pub local: bool,
    pub remote: bool,
}

/// Accumulates delta time and reports when each store may be written.
///
/// Local writes happen only while there are unsaved changes. Remote pushes
/// follow the same dirty rule on their own, slower clock.
#[derive(Debug, Clone)]
pub struct SyncScheduler {
    local_interval: f32,
    remote_interval: f32,
    since_local: f32,
    since_remote: f32,
    local_dirty: bool,
    remote_dirty: bool,
    force_local: bool,
}

impl Default for SyncScheduler {
    fn default() -> Self {
        Self::new(LOCAL_SAVE_INTERVAL_SECS, REMOTE_SYNC_INTERVAL_SECS)
    }
}

impl SyncScheduler {
    pub fn new(local_interval: f32, remote_interval: f32) -> Self {
        Self {
            local_interval,
            remote_interval,
            since_local: 0.0,
            since_remote: 0.0,
            local_dirty: false,
            remote_dirty: false,
            force_local: false,
        }
    }

    /// Record that progress changed.
    pub fn mark_dirty(&mut self) {
        self.local_dirty = true;
        self.remote_dirty = true;
    }

    /// Request a local write on the next tick regardless of the throttle.
    pub fn force_local(&mut self) {
        self.local_dirty = true;
        self.remote_dirty = true;
        self.force_local = true;
    }

    /// Keep the remote side pending after a failed push; it goes out again
    /// at the next remote interval.
    pub fn retry_remote(&mut self) {
        self.remote_dirty = true;
    }

    /// Advance the clocks and report which writes are due. Due writes are
    /// considered done once reported.
    pub fn tick(&mut self, dt: f32) -> SyncDue {
        self.since_local += dt;
        self.since_remote += dt;

        let mut due = SyncDue::default();
        if self.local_dirty && (self.force_local || self.since_local >= self.local_interval) {
            due.local = true;
            self.local_dirty = false;
            self.force_local = false;
            self.since_local = 0.0;
        }
        if self.remote_dirty && self.since_remote >= self.remote_interval {
            due.remote = true;
            self.remote_dirty = false;
            self.since_remote = 0.0;
        }
        due
    }
}
