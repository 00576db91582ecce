//! Progress persistence glue between the engine and the stores.
//!
//! Store failures are logged and never roll back simulation state.

use tracing::{info, warn};

use starfall_persist::{LocalStore, ProgressSnapshot, RemoteLink, RemoteResponse, SyncScheduler};

#[derive(Default)]
pub struct ProgressSync {
    local: Option<Box<dyn LocalStore>>,
    remote: Option<RemoteLink>,
    scheduler: SyncScheduler,
}

impl ProgressSync {
    pub fn new(local: Box<dyn LocalStore>, remote: Option<RemoteLink>) -> Self {
        Self {
            local: Some(local),
            remote,
            scheduler: SyncScheduler::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.local.is_some() || self.remote.is_some()
    }

    /// Read the local record, if any.
    pub fn load_local(&self) -> Option<ProgressSnapshot> {
        let local = self.local.as_ref()?;
        match local.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "failed to load local progress");
                None
            }
        }
    }

    pub fn request_pull(&mut self) {
        if let Some(remote) = self.remote.as_mut() {
            remote.request_pull();
        }
    }

    pub fn mark_dirty(&mut self) {
        self.scheduler.mark_dirty();
    }

    pub fn force_local(&mut self) {
        self.scheduler.force_local();
    }

    /// Collect finished remote work. Returns pulled snapshots to reconcile.
    pub fn poll_remote(&mut self) -> Vec<ProgressSnapshot> {
        let Some(remote) = self.remote.as_mut() else {
            return Vec::new();
        };
        let mut pulled = Vec::new();
        for response in remote.poll() {
            match response {
                RemoteResponse::Pushed(Ok(())) => info!("progress pushed to remote"),
                RemoteResponse::Pushed(Err(e)) => {
                    warn!(error = %e, "remote push failed; retrying next interval");
                    self.scheduler.retry_remote();
                }
                RemoteResponse::Pulled(Ok(Some(snapshot))) => pulled.push(snapshot),
                RemoteResponse::Pulled(Ok(None)) => info!("no remote progress yet"),
                RemoteResponse::Pulled(Err(e)) => warn!(error = %e, "remote pull failed"),
            }
        }
        pulled
    }

    /// Write the local record now, bypassing the throttle.
    pub fn flush(&mut self, progress: ProgressSnapshot) {
        let Some(local) = self.local.as_mut() else {
            return;
        };
        match local.save(&progress) {
            Ok(()) => info!(score = progress.total_score, "progress saved"),
            Err(e) => warn!(error = %e, "failed to save local progress"),
        }
    }

    /// Advance the throttle and write whatever is due.
    pub fn tick(&mut self, dt: f32, progress: ProgressSnapshot) {
        let due = self.scheduler.tick(dt);
        if due.local {
            if let Some(local) = self.local.as_mut() {
                if let Err(e) = local.save(&progress) {
                    warn!(error = %e, "failed to save local progress");
                }
            }
        }
        if due.remote {
            if let Some(remote) = self.remote.as_mut() {
                remote.request_push(progress);
            }
        }
    }
}
