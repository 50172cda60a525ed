//! Atomically replaceable snapshot holder.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::dataset::{DatasetError, DatasetSource};

use super::load::Snapshot;

/// Holds the current [`Snapshot`] and swaps it on reload.
///
/// Readers take a cheap `Arc` clone; queries already running keep the
/// snapshot they started with.
#[derive(Clone)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<Snapshot>>>,
    generation: Arc<AtomicU64>,
    source: Option<Arc<DatasetSource>>,
}

impl SnapshotStore {
    /// Create a store publishing `snapshot` as generation 1.
    pub fn new(snapshot: Snapshot) -> Self {
        let generation = Arc::new(AtomicU64::new(1));
        let snapshot = Snapshot {
            generation: 1,
            ..snapshot
        };
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
            generation,
            source: None,
        }
    }

    /// Load the first snapshot from `source` and keep the source for refreshes.
    pub async fn open(source: DatasetSource) -> Result<Self, DatasetError> {
        let snapshot = source.load().await?;
        Ok(Self {
            source: Some(Arc::new(source)),
            ..Self::new(snapshot)
        })
    }

    /// The snapshot currently published.
    pub async fn current(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Generation of the published snapshot.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Publish a new snapshot, returning its generation.
    pub async fn replace(&self, snapshot: Snapshot) -> u64 {
        let mut guard = self.current.write().await;
        let generation = self.generation.load(Ordering::Acquire) + 1;
        *guard = Arc::new(Snapshot {
            generation,
            ..snapshot
        });
        self.generation.store(generation, Ordering::Release);
        info!(generation, "snapshot published");
        generation
    }

    /// Reload from the dataset source.
    ///
    /// On success, publishes the new snapshot and returns its generation. On
    /// failure, the current snapshot stays published and the error is
    /// returned. Without a source this is a no-op returning the current
    /// generation.
    pub async fn refresh(&self) -> Result<u64, DatasetError> {
        let Some(source) = &self.source else {
            return Ok(self.generation());
        };

        match source.load().await {
            Ok(snapshot) => Ok(self.replace(snapshot).await),
            Err(e) => {
                warn!(error = %e, "snapshot refresh failed, keeping current data");
                Err(e)
            }
        }
    }
}
