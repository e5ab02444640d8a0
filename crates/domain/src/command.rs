//! Command handling infrastructure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use common::SessionId;
use snapshot_store::{Revision, SnapshotStore, SnapshotStoreExt};
use tokio::sync::watch;

use crate::aggregate::{Aggregate, DomainEvent, SnapshotCapable};
use crate::error::DomainError;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The events that were decided and applied. Empty for a no-op.
    pub events: Vec<A::Event>,

    /// The revision of the state after the command.
    pub revision: Revision,
}

impl<A: Aggregate> CommandResult<A> {
    /// Returns true if the command changed the state.
    pub fn changed(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Trait for commands that can be executed against an aggregate.
///
/// A command looks at the current state and decides which events, if any,
/// follow from it. Deciding is pure; applying and persisting is done by the
/// [`CommandHandler`].
pub trait Command: std::fmt::Debug + Send + Sync {
    /// The type of aggregate this command targets.
    type Aggregate: Aggregate;

    /// Short command name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Decides the events that result from running this command on `state`.
    fn decide(self, state: &Self::Aggregate) -> Vec<<Self::Aggregate as Aggregate>::Event>;
}

/// A published state change, as seen by subscribers.
#[derive(Debug, Clone)]
pub struct StateChange<A> {
    /// Revision after the change.
    pub revision: Revision,

    /// Full state after the change.
    pub state: A,
}

#[derive(Debug)]
struct Slot<A> {
    state: A,
    revision: Revision,
}

/// Owns one aggregate and runs commands against it.
///
/// The handler is responsible for:
/// 1. Rehydrating the aggregate from its snapshot when opened
/// 2. Deciding and applying events for each command
/// 3. Writing a fresh snapshot after every change
/// 4. Publishing the new state to subscribers
///
/// Persistence failures never reach the caller. The first failed write
/// switches the handler to in-memory-only operation for the rest of its
/// lifetime.
pub struct CommandHandler<S, A>
where
    S: SnapshotStore,
    A: SnapshotCapable,
{
    session_id: SessionId,
    store: S,
    slot: RwLock<Slot<A>>,
    degraded: AtomicBool,
    changes: watch::Sender<StateChange<A>>,
}

impl<S, A> CommandHandler<S, A>
where
    S: SnapshotStore,
    A: SnapshotCapable,
{
    /// Opens a handler over `store`, rehydrating the aggregate from its snapshot.
    ///
    /// A missing, unreadable, incompatible or inconsistent snapshot yields the
    /// default state.
    pub fn open(store: S) -> Self {
        let session_id = SessionId::new();
        let key = A::snapshot_key();

        let (revision, state) = match store.load_state::<A>(key, A::schema_version()) {
            Ok(Some((revision, state))) if state.is_consistent() => {
                tracing::info!(%session_id, key, %revision, "state rehydrated from snapshot");
                (revision, state)
            }
            Ok(Some((revision, _))) => {
                tracing::warn!(%session_id, key, %revision, "snapshot inconsistent, starting empty");
                (Revision::initial(), A::default())
            }
            Ok(None) => {
                tracing::debug!(%session_id, key, "no usable snapshot, starting empty");
                (Revision::initial(), A::default())
            }
            Err(e) => {
                tracing::warn!(%session_id, key, error = %e, "snapshot unreadable, starting empty");
                (Revision::initial(), A::default())
            }
        };

        let (changes, _) = watch::channel(StateChange {
            revision,
            state: state.clone(),
        });

        Self {
            session_id,
            store,
            slot: RwLock::new(Slot { state, revision }),
            degraded: AtomicBool::new(false),
            changes,
        }
    }

    /// Returns the id of this handler's session.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns a reference to the underlying snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns true once a snapshot write has failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Runs `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&A) -> R) -> R {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        f(&slot.state)
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> A {
        self.read(A::clone)
    }

    /// Returns the current revision.
    pub fn revision(&self) -> Revision {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .revision
    }

    /// Subscribes to state changes.
    ///
    /// The receiver immediately holds the current state and is marked changed
    /// after every command that produced events.
    pub fn subscribe(&self) -> watch::Receiver<StateChange<A>> {
        self.changes.subscribe()
    }

    /// Executes a command, persists the result and notifies subscribers.
    ///
    /// Commands that decide no events leave the state, the revision and the
    /// snapshot untouched.
    pub fn execute<C>(&self, command: C) -> CommandResult<A>
    where
        C: Command<Aggregate = A>,
    {
        let name = command.name();
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);

        let events = command.decide(&slot.state);
        metrics::counter!("commands_total", "aggregate" => A::aggregate_type(), "command" => name)
            .increment(1);

        if events.is_empty() {
            tracing::debug!(command = name, "command produced no events");
            return CommandResult {
                events,
                revision: slot.revision,
            };
        }

        for event in &events {
            tracing::trace!(command = name, event = event.event_type(), "applying event");
            slot.state.apply(event.clone());
        }
        slot.revision = slot.revision.next();

        self.persist(&slot.state, slot.revision);
        self.changes.send_replace(StateChange {
            revision: slot.revision,
            state: slot.state.clone(),
        });

        CommandResult {
            events,
            revision: slot.revision,
        }
    }

    fn persist(&self, state: &A, revision: Revision) {
        if self.is_degraded() {
            return;
        }

        if let Err(e) = self.try_persist(state, revision) {
            self.degraded.store(true, Ordering::Relaxed);
            metrics::counter!("snapshot_persist_failures_total", "key" => A::snapshot_key())
                .increment(1);
            tracing::warn!(
                session_id = %self.session_id,
                key = A::snapshot_key(),
                error = %e,
                "snapshot write failed, continuing in memory only"
            );
        }
    }

    fn try_persist(&self, state: &A, revision: Revision) -> Result<(), DomainError> {
        self.store
            .save_state(A::snapshot_key(), A::schema_version(), revision, state)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use snapshot_store::{InMemorySnapshotStore, Snapshot, SnapshotStoreError};

    #[derive(Debug, Clone)]
    enum CounterEvent {
        Added(i32),
    }

    impl DomainEvent for CounterEvent {
        fn event_type(&self) -> &'static str {
            "Added"
        }
    }

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: i32,
    }

    impl Aggregate for Counter {
        type Event = CounterEvent;

        fn aggregate_type() -> &'static str {
            "Counter"
        }

        fn apply(&mut self, event: Self::Event) {
            match event {
                CounterEvent::Added(n) => self.value += n,
            }
        }
    }

    impl SnapshotCapable for Counter {
        fn snapshot_key() -> &'static str {
            "counter"
        }

        fn is_consistent(&self) -> bool {
            self.value >= 0
        }
    }

    #[derive(Debug)]
    struct Add(i32);

    impl Command for Add {
        type Aggregate = Counter;

        fn name(&self) -> &'static str {
            "add"
        }

        fn decide(self, _state: &Counter) -> Vec<CounterEvent> {
            if self.0 == 0 {
                vec![]
            } else {
                vec![CounterEvent::Added(self.0)]
            }
        }
    }

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn load(&self, _key: &str) -> snapshot_store::Result<Option<Snapshot>> {
            Err(SnapshotStoreError::Unavailable("denied".into()))
        }

        fn save(&self, _snapshot: Snapshot) -> snapshot_store::Result<()> {
            Err(SnapshotStoreError::Unavailable("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> snapshot_store::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_execute_applies_and_bumps_revision() {
        let handler: CommandHandler<_, Counter> =
            CommandHandler::open(InMemorySnapshotStore::new());

        let result = handler.execute(Add(5));
        assert!(result.changed());
        assert_eq!(result.revision, Revision::new(1));
        assert_eq!(handler.state().value, 5);
    }

    #[test]
    fn test_empty_decision_changes_nothing() {
        let store = InMemorySnapshotStore::new();
        let handler: CommandHandler<_, Counter> = CommandHandler::open(store.clone());

        let result = handler.execute(Add(0));
        assert!(!result.changed());
        assert_eq!(handler.revision(), Revision::initial());
        assert!(store.is_empty());
    }

    #[test]
    fn test_execute_persists_snapshot() {
        let store = InMemorySnapshotStore::new();
        let handler: CommandHandler<_, Counter> = CommandHandler::open(store.clone());
        handler.execute(Add(3));
        handler.execute(Add(4));

        let (revision, state): (Revision, Counter) =
            store.load_state("counter", 1).unwrap().unwrap();
        assert_eq!(revision, Revision::new(2));
        assert_eq!(state.value, 7);
    }

    #[test]
    fn test_open_rehydrates_from_store() {
        let store = InMemorySnapshotStore::new();
        {
            let handler: CommandHandler<_, Counter> = CommandHandler::open(store.clone());
            handler.execute(Add(10));
        }

        let reopened: CommandHandler<_, Counter> = CommandHandler::open(store);
        assert_eq!(reopened.state().value, 10);
        assert_eq!(reopened.revision(), Revision::new(1));
    }

    #[test]
    fn test_inconsistent_snapshot_yields_default() {
        let store = InMemorySnapshotStore::new();
        store
            .save_state("counter", 1, Revision::new(3), &Counter { value: -4 })
            .unwrap();

        let handler: CommandHandler<_, Counter> = CommandHandler::open(store);
        assert_eq!(handler.state(), Counter::default());
        assert_eq!(handler.revision(), Revision::initial());
    }

    #[test]
    fn test_broken_store_degrades_without_error() {
        let handler: CommandHandler<_, Counter> = CommandHandler::open(BrokenStore);
        assert_eq!(handler.state(), Counter::default());
        assert!(!handler.is_degraded());

        handler.execute(Add(1));
        assert!(handler.is_degraded());

        handler.execute(Add(2));
        assert_eq!(handler.state().value, 3);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let handler: CommandHandler<_, Counter> =
            CommandHandler::open(InMemorySnapshotStore::new());
        let mut rx = handler.subscribe();
        assert!(!rx.has_changed().unwrap());

        handler.execute(Add(2));
        assert!(rx.has_changed().unwrap());

        let change = rx.borrow_and_update().clone();
        assert_eq!(change.revision, Revision::new(1));
        assert_eq!(change.state.value, 2);

        handler.execute(Add(0));
        assert!(!rx.has_changed().unwrap());
    }
}
