use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Result, Snapshot, SnapshotStoreError, store::SnapshotStore, store::validate_key};

/// In-memory snapshot store.
///
/// Used in tests and as the fallback when no durable medium is configured.
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshots: Arc<RwLock<HashMap<String, Snapshot>>>,
}

impl InMemorySnapshotStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Returns true if no snapshot is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every snapshot.
    pub fn clear(&self) {
        if let Ok(mut map) = self.snapshots.write() {
            map.clear();
        }
    }
}

fn poisoned() -> SnapshotStoreError {
    SnapshotStoreError::Unavailable("in-memory store lock poisoned".to_string())
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<Snapshot>> {
        validate_key(key)?;
        let map = self.snapshots.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, snapshot: Snapshot) -> Result<()> {
        validate_key(&snapshot.key)?;
        let mut map = self.snapshots.write().map_err(|_| poisoned())?;
        map.insert(snapshot.key.clone(), snapshot);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut map = self.snapshots.write().map_err(|_| poisoned())?;
        map.remove(key);
        Ok(())
    }
}
