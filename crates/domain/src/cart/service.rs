//! Cart engine providing the API the ordering screens use.

use common::{DishId, SessionId, SpecId, TableId};
use snapshot_store::{Revision, SnapshotStore};
use tokio::sync::watch;

use crate::command::{CommandHandler, CommandResult, StateChange};

use super::{
    AddItem, Cart, CheckoutError, ClearCart, CreateOrderRequest, ItemKey, LineItem, Money,
    RemoveItem, SessionContext, SetSessionInfo, StartTableSession, UpdateNote, UpdateQuantity,
};

/// The shopping-cart engine.
///
/// Wraps a [`CommandHandler`] over the [`Cart`] aggregate. Every mutation runs
/// to completion synchronously; unknown keys are silently ignored and storage
/// problems never surface to the caller.
pub struct CartEngine<S: SnapshotStore> {
    handler: CommandHandler<S, Cart>,
}

impl<S: SnapshotStore> CartEngine<S> {
    /// Opens the engine, rehydrating the cart from `store`.
    pub fn open(store: S) -> Self {
        Self {
            handler: CommandHandler::open(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, Cart> {
        &self.handler
    }

    /// Returns the id of this engine session.
    pub fn session_id(&self) -> SessionId {
        self.handler.session_id()
    }

    /// Adds a line, or grows the quantity of the line with the same key.
    #[tracing::instrument(skip(self), fields(dish_id = %item.dish_id))]
    pub fn add_item(&self, item: LineItem) -> CommandResult<Cart> {
        self.handler.execute(AddItem::new(item))
    }

    /// Sets the quantity of a line; zero or below removes it.
    #[tracing::instrument(skip(self))]
    pub fn update_quantity(
        &self,
        dish_id: DishId,
        new_quantity: i64,
        spec_id: Option<SpecId>,
    ) -> CommandResult<Cart> {
        self.handler
            .execute(UpdateQuantity::new(dish_id, new_quantity, spec_id))
    }

    /// Overwrites the note of a line.
    #[tracing::instrument(skip(self))]
    pub fn update_note(
        &self,
        dish_id: DishId,
        note: Option<String>,
        spec_id: Option<SpecId>,
    ) -> CommandResult<Cart> {
        self.handler.execute(UpdateNote::new(dish_id, note, spec_id))
    }

    /// Removes a line.
    #[tracing::instrument(skip(self))]
    pub fn remove_item(&self, dish_id: DishId, spec_id: Option<SpecId>) -> CommandResult<Cart> {
        self.handler.execute(RemoveItem::new(dish_id, spec_id))
    }

    /// Empties the cart and resets the session to its defaults.
    #[tracing::instrument(skip(self))]
    pub fn clear_cart(&self) -> CommandResult<Cart> {
        self.handler.execute(ClearCart)
    }

    /// Replaces the session context as a whole.
    #[tracing::instrument(skip(self))]
    pub fn set_session_info(
        &self,
        table_id: TableId,
        table_label: &str,
        party_size: u32,
    ) -> CommandResult<Cart> {
        self.handler
            .execute(SetSessionInfo::new(table_id, table_label, party_size))
    }

    /// Sets the table with a party of one.
    pub fn set_table(&self, table_id: TableId, table_label: &str) -> CommandResult<Cart> {
        self.set_session_info(table_id, table_label, 1)
    }

    /// Clears the cart and seats it at a table in one step.
    #[tracing::instrument(skip(self))]
    pub fn start_table_session(
        &self,
        table_id: TableId,
        table_label: &str,
        party_size: u32,
    ) -> CommandResult<Cart> {
        self.handler
            .execute(StartTableSession::new(table_id, table_label, party_size))
    }

    /// Returns a copy of all lines in insertion order.
    pub fn items(&self) -> Vec<LineItem> {
        self.handler.read(|cart| cart.items().to_vec())
    }

    /// Returns a copy of the line with the given key.
    pub fn get_item(&self, key: &ItemKey) -> Option<LineItem> {
        self.handler.read(|cart| cart.get_item(key).cloned())
    }

    /// Returns a copy of the session context.
    pub fn session(&self) -> SessionContext {
        self.handler.read(|cart| cart.session().clone())
    }

    /// Sum of quantities over all lines.
    pub fn total_count(&self) -> u64 {
        self.handler.read(Cart::total_count)
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn total_amount(&self) -> Money {
        self.handler.read(Cart::total_amount)
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.handler.read(Cart::is_empty)
    }

    /// Returns a copy of the whole cart.
    pub fn snapshot(&self) -> Cart {
        self.handler.state()
    }

    /// Returns the current revision.
    pub fn revision(&self) -> Revision {
        self.handler.revision()
    }

    /// Subscribes to cart changes.
    pub fn subscribe(&self) -> watch::Receiver<StateChange<Cart>> {
        self.handler.subscribe()
    }

    /// Returns true once the cart stopped persisting.
    pub fn is_degraded(&self) -> bool {
        self.handler.is_degraded()
    }

    /// Builds the order-creation payload for the current cart.
    pub fn order_request(
        &self,
        remark: Option<String>,
    ) -> Result<CreateOrderRequest, CheckoutError> {
        self.handler.read(|cart| cart.order_request(remark))
    }
}
