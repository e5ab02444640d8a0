use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, Revision, Snapshot};

/// Core trait for snapshot store implementations.
///
/// A snapshot store is a durable key-value map holding at most one snapshot
/// per key. Calls are synchronous: client state is persisted inline after
/// each mutation and never awaited.
pub trait SnapshotStore: Send + Sync {
    /// Retrieves the snapshot stored under `key`.
    ///
    /// Returns None if nothing is stored under that key.
    fn load(&self, key: &str) -> Result<Option<Snapshot>>;

    /// Stores a snapshot, replacing any previous one under the same key.
    fn save(&self, snapshot: Snapshot) -> Result<()>;

    /// Deletes the snapshot under `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Extension trait providing typed access on top of [`SnapshotStore`].
pub trait SnapshotStoreExt: SnapshotStore {
    /// Loads and deserializes the state under `key`.
    ///
    /// A snapshot written with a different schema version is treated as
    /// absent and `Ok(None)` is returned.
    fn load_state<T: DeserializeOwned>(
        &self,
        key: &str,
        schema_version: u32,
    ) -> Result<Option<(Revision, T)>> {
        let Some(snapshot) = self.load(key)? else {
            return Ok(None);
        };

        if !snapshot.is_schema(schema_version) {
            tracing::warn!(
                key,
                found = snapshot.schema_version,
                expected = schema_version,
                "discarding snapshot with unknown schema version"
            );
            return Ok(None);
        }

        let revision = snapshot.revision;
        Ok(Some((revision, snapshot.into_state()?)))
    }

    /// Serializes `state` and stores it under `key`.
    fn save_state<T: Serialize>(
        &self,
        key: &str,
        schema_version: u32,
        revision: Revision,
        state: &T,
    ) -> Result<()> {
        let snapshot = Snapshot::from_state(key, schema_version, revision, state)?;
        self.save(snapshot)
    }
}

// Blanket implementation for all SnapshotStore implementations
impl<T: SnapshotStore + ?Sized> SnapshotStoreExt for T {}

/// Checks that a key is safe to use as a file name or map key.
///
/// Keys are non-empty and limited to ASCII letters, digits, `-` and `_`.
pub fn validate_key(key: &str) -> std::result::Result<(), crate::SnapshotStoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(crate::SnapshotStoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_accepts_simple_names() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("auth_v2").is_ok());
        assert!(validate_key("pad-1").is_ok());
    }

    #[test]
    fn validate_key_rejects_paths_and_empty() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../cart").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("cart.json").is_err());
    }
}
