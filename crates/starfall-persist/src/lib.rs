//! Progress persistence for STARFALL.
//!
//! A local JSON store written on a throttle, a remote store reached through
//! a worker thread whose results are polled by the simulation tick, and the
//! per-field reconciliation that merges the two.

pub mod error;
pub mod local;
pub mod progress;
pub mod remote;
pub mod schedule;

pub use error::{PersistError, PersistResult};
pub use local::{JsonFileStore, LocalStore, MemoryStore};
pub use progress::{reconcile, ProgressSnapshot};
pub use remote::{RemoteBackend, RemoteLink, RemoteResponse};
pub use schedule::{SyncDue, SyncScheduler};
