//! Core aggregate and domain event traits.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events describe a state change that has been decided. They are
/// immutable and named in past tense.
pub trait DomainEvent: std::fmt::Debug + Clone + Send + Sync {
    /// Returns the event type name.
    ///
    /// Used in log lines and metric labels.
    fn event_type(&self) -> &'static str;
}

/// Trait for client-side aggregates.
///
/// An aggregate is a piece of state that only ever changes by applying its
/// own events:
/// - command methods inspect the current state and return events
/// - `apply` folds one event into the state (pure, deterministic)
///
/// Nothing in an aggregate touches storage; persistence is the
/// [`CommandHandler`](crate::CommandHandler)'s job.
pub trait Aggregate: Default + Clone + Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Applies an event to the aggregate, updating its state.
    ///
    /// This method must be pure and deterministic:
    /// - Given the same state and event, it must always produce the same new state
    /// - It must not have side effects
    /// - It must not fail (events represent decisions already taken)
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }
}

/// Trait for aggregates that are persisted as a key-value snapshot.
///
/// The whole state is written after every transition and read back once
/// when the owning engine is opened.
pub trait SnapshotCapable: Aggregate + Serialize + DeserializeOwned {
    /// Storage key the snapshot is written under.
    fn snapshot_key() -> &'static str;

    /// Schema version of the serialized state.
    ///
    /// Bump this whenever the serialized shape changes incompatibly; older
    /// snapshots are then discarded instead of misparsed.
    fn schema_version() -> u32 {
        1
    }

    /// Returns false if a rehydrated state breaks the aggregate's invariants.
    ///
    /// Such a snapshot is treated like an unreadable one.
    fn is_consistent(&self) -> bool {
        true
    }
}
