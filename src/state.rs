use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use log::{error, info};

use crate::data::loader::load_file;
use crate::data::RecordStore;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Process-wide state shared by every request.
///
/// The store is replaced whole on reload; readers hold their own `Arc`
/// snapshot and never observe a partially loaded dataset.
pub struct AppState {
    store: ArcSwap<RecordStore>,
    data_path: PathBuf,
}

impl AppState {
    /// Wrap an already-built store. `data_path` is where reloads read from.
    pub fn new(store: RecordStore, data_path: impl Into<PathBuf>) -> Self {
        Self {
            store: ArcSwap::from_pointee(store),
            data_path: data_path.into(),
        }
    }

    /// Load the dataset at `path`. Any failure is returned to the caller.
    pub fn load(path: &Path) -> Result<Self> {
        let store = load_file(path)?;
        Ok(Self::new(store, path))
    }

    /// Snapshot of the current store.
    pub fn store(&self) -> Arc<RecordStore> {
        self.store.load_full()
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Swap in a new store.
    pub fn set_store(&self, store: RecordStore) {
        self.store.store(Arc::new(store));
    }

    /// Re-read the dataset file. On failure the current store is kept.
    pub fn reload(&self) -> Result<()> {
        match load_file(&self.data_path) {
            Ok(store) => {
                info!(
                    "Reloaded {} records from {}",
                    store.len(),
                    self.data_path.display()
                );
                self.set_store(store);
                Ok(())
            }
            Err(e) => {
                error!("Reload of {} failed, keeping current data: {e:#}", self.data_path.display());
                Err(e)
            }
        }
    }
}
