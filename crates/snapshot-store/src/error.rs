use thiserror::Error;

/// Errors that can occur when reading or writing snapshots.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    /// The backing medium could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot or its state could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key contains characters the store cannot represent.
    #[error("Invalid snapshot key: {0:?}")]
    InvalidKey(String),

    /// The store refused the operation (quota, access denied, poisoned lock).
    #[error("Snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for snapshot store operations.
pub type Result<T> = std::result::Result<T, SnapshotStoreError>;
