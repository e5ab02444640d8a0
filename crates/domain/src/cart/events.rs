//! Cart domain events.

use crate::aggregate::DomainEvent;

use super::{ItemKey, LineItem, SessionContext};

/// Events that can occur on the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    ItemAdded(LineItem),

    /// The quantity of an existing line changed (merge on add, or explicit update).
    ItemQuantityChanged(ItemQuantityChangedData),

    /// The note of a line was overwritten.
    ItemNoteUpdated(ItemNoteUpdatedData),

    /// A line was removed.
    ItemRemoved(ItemKey),

    /// All lines were removed and the session reset.
    CartCleared,

    /// The session context was replaced as a whole.
    SessionInfoSet(SessionContext),
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "ItemAdded",
            CartEvent::ItemQuantityChanged(_) => "ItemQuantityChanged",
            CartEvent::ItemNoteUpdated(_) => "ItemNoteUpdated",
            CartEvent::ItemRemoved(_) => "ItemRemoved",
            CartEvent::CartCleared => "CartCleared",
            CartEvent::SessionInfoSet(_) => "SessionInfoSet",
        }
    }
}

/// Data for ItemQuantityChanged event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuantityChangedData {
    /// The line whose quantity changed.
    pub key: ItemKey,

    /// Previous quantity.
    pub old_quantity: u32,

    /// New quantity (always at least 1).
    pub new_quantity: u32,
}

/// Data for ItemNoteUpdated event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNoteUpdatedData {
    pub key: ItemKey,
    pub note: Option<String>,
}

// Convenience constructors for events
impl CartEvent {
    /// Creates an ItemQuantityChanged event.
    pub fn quantity_changed(key: ItemKey, old_quantity: u32, new_quantity: u32) -> Self {
        CartEvent::ItemQuantityChanged(ItemQuantityChangedData {
            key,
            old_quantity,
            new_quantity,
        })
    }

    /// Creates an ItemNoteUpdated event.
    pub fn note_updated(key: ItemKey, note: Option<String>) -> Self {
        CartEvent::ItemNoteUpdated(ItemNoteUpdatedData { key, note })
    }
}
