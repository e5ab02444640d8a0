//! Cart commands.

use common::{DishId, SpecId, TableId};

use crate::command::Command;

use super::{Cart, CartEvent, ItemKey, LineItem, SessionContext};

/// Command to add a line, merging into an existing line with the same key.
#[derive(Debug, Clone)]
pub struct AddItem {
    pub item: LineItem,
}

impl AddItem {
    /// Creates a new AddItem command.
    pub fn new(item: LineItem) -> Self {
        Self { item }
    }
}

impl Command for AddItem {
    type Aggregate = Cart;

    fn name(&self) -> &'static str {
        "add_item"
    }

    fn decide(self, cart: &Cart) -> Vec<CartEvent> {
        cart.add_item(self.item)
    }
}

/// Command to set the quantity of a line.
///
/// The quantity is signed so that callers can pass decrements straight
/// through; zero or below removes the line.
#[derive(Debug, Clone)]
pub struct UpdateQuantity {
    pub key: ItemKey,
    pub new_quantity: i64,
}

impl UpdateQuantity {
    /// Creates a new UpdateQuantity command.
    pub fn new(dish_id: DishId, new_quantity: i64, spec_id: Option<SpecId>) -> Self {
        Self {
            key: ItemKey::new(dish_id, spec_id),
            new_quantity,
        }
    }
}

impl Command for UpdateQuantity {
    type Aggregate = Cart;

    fn name(&self) -> &'static str {
        "update_quantity"
    }

    fn decide(self, cart: &Cart) -> Vec<CartEvent> {
        cart.update_quantity(self.key, self.new_quantity)
    }
}

/// Command to overwrite the note of a line.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub key: ItemKey,
    pub note: Option<String>,
}

impl UpdateNote {
    /// Creates a new UpdateNote command.
    pub fn new(dish_id: DishId, note: Option<String>, spec_id: Option<SpecId>) -> Self {
        Self {
            key: ItemKey::new(dish_id, spec_id),
            note,
        }
    }
}

impl Command for UpdateNote {
    type Aggregate = Cart;

    fn name(&self) -> &'static str {
        "update_note"
    }

    fn decide(self, cart: &Cart) -> Vec<CartEvent> {
        cart.update_note(self.key, self.note)
    }
}

/// Command to remove a line.
#[derive(Debug, Clone)]
pub struct RemoveItem {
    pub key: ItemKey,
}

impl RemoveItem {
    /// Creates a new RemoveItem command.
    pub fn new(dish_id: DishId, spec_id: Option<SpecId>) -> Self {
        Self {
            key: ItemKey::new(dish_id, spec_id),
        }
    }
}

impl Command for RemoveItem {
    type Aggregate = Cart;

    fn name(&self) -> &'static str {
        "remove_item"
    }

    fn decide(self, cart: &Cart) -> Vec<CartEvent> {
        cart.remove_item(self.key)
    }
}

/// Command to empty the cart and reset the session.
#[derive(Debug, Clone, Default)]
pub struct ClearCart;

impl Command for ClearCart {
    type Aggregate = Cart;

    fn name(&self) -> &'static str {
        "clear_cart"
    }

    fn decide(self, cart: &Cart) -> Vec<CartEvent> {
        cart.clear()
    }
}

/// Command to replace the session context.
#[derive(Debug, Clone)]
pub struct SetSessionInfo {
    pub session: SessionContext,
}

impl SetSessionInfo {
    /// Creates a new SetSessionInfo command.
    pub fn new(table_id: TableId, table_label: impl Into<String>, party_size: u32) -> Self {
        Self {
            session: SessionContext::new(table_id, table_label, party_size),
        }
    }
}

impl Command for SetSessionInfo {
    type Aggregate = Cart;

    fn name(&self) -> &'static str {
        "set_session_info"
    }

    fn decide(self, cart: &Cart) -> Vec<CartEvent> {
        cart.set_session_info(self.session)
    }
}

/// Command to clear the cart and seat it at a new table.
#[derive(Debug, Clone)]
pub struct StartTableSession {
    pub session: SessionContext,
}

impl StartTableSession {
    /// Creates a new StartTableSession command.
    pub fn new(table_id: TableId, table_label: impl Into<String>, party_size: u32) -> Self {
        Self {
            session: SessionContext::new(table_id, table_label, party_size),
        }
    }
}

impl Command for StartTableSession {
    type Aggregate = Cart;

    fn name(&self) -> &'static str {
        "start_table_session"
    }

    fn decide(self, cart: &Cart) -> Vec<CartEvent> {
        cart.start_table_session(self.session)
    }
}
