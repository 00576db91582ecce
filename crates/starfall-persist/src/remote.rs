//! Remote progress store, reached through a worker thread.
//!
//! The simulation never blocks on the remote side. Requests are sent
//! fire-and-forget; completed results land in a channel that the tick
//! drains with `poll`.

use std::sync::mpsc;

use tracing::{debug, warn};

use crate::error::{PersistError, PersistResult};
use crate::local::JsonFileStore;
use crate::progress::ProgressSnapshot;

/// Blocking remote transport. Runs on the worker thread only.
pub trait RemoteBackend: Send + 'static {
    fn push(&mut self, snapshot: &ProgressSnapshot) -> PersistResult<()>;
    fn pull(&mut self) -> PersistResult<Option<ProgressSnapshot>>;
}

/// A directory standing in for the remote store.
impl RemoteBackend for JsonFileStore {
    fn push(&mut self, snapshot: &ProgressSnapshot) -> PersistResult<()> {
        self.write(snapshot)
    }

    fn pull(&mut self) -> PersistResult<Option<ProgressSnapshot>> {
        match self.read() {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(PersistError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug)]
enum RemoteRequest {
    Push(ProgressSnapshot),
    Pull,
}

/// A completed remote operation.
#[derive(Debug)]
pub enum RemoteResponse {
    Pushed(PersistResult<()>),
    Pulled(PersistResult<Option<ProgressSnapshot>>),
}

/// Handle owned by the simulation side.
pub struct RemoteLink {
    request_tx: mpsc::Sender<RemoteRequest>,
    response_rx: mpsc::Receiver<RemoteResponse>,
    in_flight: usize,
}

impl RemoteLink {
    /// Start a worker thread that serves requests with `backend`.
    ///
    /// The worker exits when the link is dropped.
    pub fn spawn(mut backend: impl RemoteBackend) -> PersistResult<Self> {
        let (request_tx, request_rx) = mpsc::channel::<RemoteRequest>();
        let (response_tx, response_rx) = mpsc::channel::<RemoteResponse>();

        std::thread::Builder::new()
            .name("starfall-remote-sync".into())
            .spawn(move || {
                for request in request_rx {
                    let response = match request {
                        RemoteRequest::Push(snapshot) => {
                            RemoteResponse::Pushed(backend.push(&snapshot))
                        }
                        RemoteRequest::Pull => RemoteResponse::Pulled(backend.pull()),
                    };
                    if response_tx.send(response).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            request_tx,
            response_rx,
            in_flight: 0,
        })
    }

    pub fn request_push(&mut self, snapshot: ProgressSnapshot) {
        self.send(RemoteRequest::Push(snapshot));
    }

    pub fn request_pull(&mut self) {
        self.send(RemoteRequest::Pull);
    }

    fn send(&mut self, request: RemoteRequest) {
        debug!(?request, "remote request");
        if self.request_tx.send(request).is_ok() {
            self.in_flight += 1;
        } else {
            warn!("remote sync worker has stopped; request dropped");
        }
    }

    /// Requests sent but not yet collected by `poll`.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Collect every completed response without blocking.
    pub fn poll(&mut self) -> Vec<RemoteResponse> {
        let mut responses = Vec::new();
        while let Ok(response) = self.response_rx.try_recv() {
            responses.push(response);
        }
        self.in_flight = self.in_flight.saturating_sub(responses.len());
        responses
    }
}
