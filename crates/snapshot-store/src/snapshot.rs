use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Revision;

/// A persisted copy of one piece of client state.
///
/// Every snapshot carries the schema version of the state it wraps. Readers
/// compare it against the version they understand and discard snapshots
/// written by an incompatible build instead of misparsing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Storage key (e.g. "cart", "auth").
    pub key: String,

    /// Schema version of `state`.
    pub schema_version: u32,

    /// Revision of the state at the time it was written.
    pub revision: Revision,

    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,

    /// The serialized state.
    pub state: serde_json::Value,
}

impl Snapshot {
    /// Creates a new snapshot.
    pub fn new(
        key: impl Into<String>,
        schema_version: u32,
        revision: Revision,
        state: serde_json::Value,
    ) -> Self {
        Self {
            key: key.into(),
            schema_version,
            revision,
            saved_at: Utc::now(),
            state,
        }
    }

    /// Creates a snapshot from a serializable state.
    pub fn from_state<T: Serialize>(
        key: impl Into<String>,
        schema_version: u32,
        revision: Revision,
        state: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            key,
            schema_version,
            revision,
            serde_json::to_value(state)?,
        ))
    }

    /// Deserializes the snapshot state into a concrete type.
    pub fn into_state<T: for<'de> Deserialize<'de>>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.state)
    }

    /// Returns true if this snapshot was written with the given schema version.
    pub fn is_schema(&self, schema_version: u32) -> bool {
        self.schema_version == schema_version
    }
}
