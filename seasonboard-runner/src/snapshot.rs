//! In-memory snapshot of the persistence layer, and the store that shares it.
//!
//! A [`Snapshot`] is what the engine reads: completions, missions and seasons
//! as the data source returned them. [`SnapshotStore`] loads it once and hands
//! out `Arc<Snapshot>` clones until [`SnapshotStore::invalidate`] is called;
//! the next [`SnapshotStore::get`] reloads. The engine only ever sees the
//! read-only snapshot for the call in hand.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use seasonboard_core::{Completion, Mission, MissionId, Season};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a shared snapshot store is already installed")]
    AlreadyInstalled,
}

/// Records as returned by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub completions: Vec<Completion>,
    #[serde(default)]
    pub missions: Vec<Mission>,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }
}

type Loader = Box<dyn Fn() -> Result<Snapshot, SnapshotError> + Send + Sync>;

/// Load-once snapshot holder with explicit invalidation.
pub struct SnapshotStore {
    loader: Loader,
    slot: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotStore {
    /// A store that reads the snapshot from a JSON file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::with_loader(move || Snapshot::from_file(&path))
    }

    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Snapshot, SnapshotError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            slot: RwLock::new(None),
        }
    }

    /// The current snapshot, loading it on first use or after invalidation.
    ///
    /// A failed load leaves the store empty, so the next call retries.
    pub fn get(&self) -> Result<Arc<Snapshot>, SnapshotError> {
        if let Some(snapshot) = self.slot.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(snapshot) = slot.as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = Arc::new((self.loader)()?);
        log::info!(
            "snapshot loaded: {} completions, {} missions, {} seasons",
            snapshot.completions.len(),
            snapshot.missions.len(),
            snapshot.seasons.len()
        );
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drop the cached snapshot. Callers holding an `Arc` keep their copy.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            log::info!("snapshot invalidated");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

static SHARED: OnceLock<SnapshotStore> = OnceLock::new();

/// Install the process-wide store. Only the first install succeeds.
pub fn install(store: SnapshotStore) -> Result<&'static SnapshotStore, SnapshotError> {
    SHARED
        .set(store)
        .map_err(|_| SnapshotError::AlreadyInstalled)?;
    SHARED.get().ok_or(SnapshotError::AlreadyInstalled)
}

/// The process-wide store, if one was installed.
pub fn shared() -> Option<&'static SnapshotStore> {
    SHARED.get()
}
