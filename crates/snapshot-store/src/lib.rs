//! Versioned key-value snapshot persistence.
//!
//! Each piece of client state (cart, auth session) is written whole under its
//! own key, together with a schema version and the revision it was taken at.

pub mod error;
pub mod file;
pub mod memory;
pub mod revision;
pub mod snapshot;
pub mod store;

pub use error::{Result, SnapshotStoreError};
pub use file::JsonFileStore;
pub use memory::InMemorySnapshotStore;
pub use revision::Revision;
pub use snapshot::Snapshot;
pub use store::{SnapshotStore, SnapshotStoreExt};
