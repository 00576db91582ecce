//! Local progress storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{PersistError, PersistResult};
use crate::progress::ProgressSnapshot;

/// Synchronous key-value store for the progress record.
pub trait LocalStore: Send {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> PersistResult<Option<ProgressSnapshot>>;
    fn save(&mut self, snapshot: &ProgressSnapshot) -> PersistResult<()>;
}

/// One pretty-printed JSON file per slot.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    slot: String,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            slot: slot.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        slot_path(&self.dir, &self.slot)
    }

    /// Read the slot, treating a missing file as an error.
    pub fn read(&self) -> PersistResult<ProgressSnapshot> {
        let path = self.path();
        if !path.exists() {
            return Err(PersistError::NotFound(self.slot.clone()));
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn write(&self, snapshot: &ProgressSnapshot) -> PersistResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(self.path(), json)?;
        debug!(slot = %self.slot, score = snapshot.total_score, "progress written");
        Ok(())
    }
}

fn slot_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.json"))
}

impl LocalStore for JsonFileStore {
    fn load(&self) -> PersistResult<Option<ProgressSnapshot>> {
        match self.read() {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(PersistError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, snapshot: &ProgressSnapshot) -> PersistResult<()> {
        self.write(snapshot)
    }
}

/// In-memory store. Clones share the same cell, so a test can keep a handle
/// while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cell: Arc<Mutex<MemoryCell>>,
}

#[derive(Debug, Default)]
struct MemoryCell {
    snapshot: Option<ProgressSnapshot>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ProgressSnapshot) -> Self {
        let store = Self::default();
        if let Ok(mut cell) = store.cell.lock() {
            cell.snapshot = Some(snapshot);
        }
        store
    }

    /// Last saved record.
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        self.cell.lock().ok().and_then(|cell| cell.snapshot)
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.cell.lock().map(|cell| cell.writes).unwrap_or(0)
    }

    /// Make subsequent saves fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut cell) = self.cell.lock() {
            cell.fail_writes = fail;
        }
    }
}

impl LocalStore for MemoryStore {
    fn load(&self) -> PersistResult<Option<ProgressSnapshot>> {
        Ok(self.snapshot())
    }

    fn save(&mut self, snapshot: &ProgressSnapshot) -> PersistResult<()> {
        let mut cell = self
            .cell
            .lock()
            .map_err(|_| PersistError::Unavailable("memory store poisoned".into()))?;
        if cell.fail_writes {
            return Err(PersistError::Io(std::io::Error::other("simulated write failure")));
        }
        cell.snapshot = Some(*snapshot);
        cell.writes += 1;
        Ok(())
    }
}
