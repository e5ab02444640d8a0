//! Domain error types.

use snapshot_store::SnapshotStoreError;
use thiserror::Error;

/// Errors raised inside the command handler.
///
/// Cart and auth mutations never return these: the handler logs them and
/// falls back to the default state or to in-memory operation.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the snapshot store.
    #[error("Snapshot store error: {0}")]
    Store(#[from] SnapshotStoreError),
}
