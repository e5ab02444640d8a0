//! Cart aggregate implementation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregate, SnapshotCapable};

use super::{
    CartEvent, CheckoutError, CreateOrderRequest, ItemKey, LineItem, Money, SessionContext,
    events::{ItemNoteUpdatedData, ItemQuantityChangedData},
};

/// Shopping cart aggregate root.
///
/// Lines keep insertion order for display. The serialized form is the
/// snapshot layout `{items, tableId, tableLabel, partySize}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order. At most one per [`ItemKey`].
    #[serde(default)]
    items: Vec<LineItem>,

    /// Table and party the cart is for.
    #[serde(flatten)]
    session: SessionContext,
}

impl Aggregate for Cart {
    type Event = CartEvent;

    fn aggregate_type() -> &'static str {
        "Cart"
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            CartEvent::ItemAdded(item) => self.items.push(item),
            CartEvent::ItemQuantityChanged(data) => self.apply_quantity_changed(data),
            CartEvent::ItemNoteUpdated(data) => self.apply_note_updated(data),
            CartEvent::ItemRemoved(key) => self.items.retain(|item| item.key() != key),
            CartEvent::CartCleared => {
                self.items.clear();
                self.session = SessionContext::default();
            }
            CartEvent::SessionInfoSet(session) => self.session = session,
        }
    }
}

impl SnapshotCapable for Cart {
    fn snapshot_key() -> &'static str {
        "cart"
    }

    /// Every line has a positive quantity and a key of its own, and the
    /// party has at least one guest.
    fn is_consistent(&self) -> bool {
        let mut keys = HashSet::with_capacity(self.items.len());
        self.session.party_size >= 1
            && self
                .items
                .iter()
                .all(|item| item.quantity >= 1 && keys.insert(item.key()))
    }
}

// Query methods
impl Cart {
    /// Returns all lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the line with the given key.
    pub fn get_item(&self, key: &ItemKey) -> Option<&LineItem> {
        self.items.iter().find(|item| item.key() == *key)
    }

    /// Returns true if a line with the given key exists.
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.get_item(key).is_some()
    }

    /// Returns the session context.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Builds the order-creation payload for the current cart.
    pub fn order_request(&self, remark: Option<String>) -> Result<CreateOrderRequest, CheckoutError> {
        CreateOrderRequest::from_cart(self, remark)
    }
}

// Command methods (return events)
impl Cart {
    /// Adds a line, or merges it into the existing line with the same key.
    ///
    /// On merge only the quantity grows; the existing line keeps its original
    /// name, price, image and note. A candidate with quantity 0 is ignored.
    pub fn add_item(&self, candidate: LineItem) -> Vec<CartEvent> {
        if candidate.quantity == 0 {
            return vec![];
        }

        match self.get_item(&candidate.key()) {
            Some(existing) => vec![CartEvent::quantity_changed(
                existing.key(),
                existing.quantity,
                existing.quantity.saturating_add(candidate.quantity),
            )],
            None => vec![CartEvent::ItemAdded(candidate)],
        }
    }

    /// Sets the quantity of a line exactly; zero or below removes it.
    pub fn update_quantity(&self, key: ItemKey, new_quantity: i64) -> Vec<CartEvent> {
        let Some(existing) = self.get_item(&key) else {
            return vec![];
        };

        if new_quantity <= 0 {
            return vec![CartEvent::ItemRemoved(key)];
        }

        let new_quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        if new_quantity == existing.quantity {
            return vec![];
        }

        vec![CartEvent::quantity_changed(
            key,
            existing.quantity,
            new_quantity,
        )]
    }

    /// Overwrites the note of a line. An empty note clears it.
    pub fn update_note(&self, key: ItemKey, note: Option<String>) -> Vec<CartEvent> {
        let Some(existing) = self.get_item(&key) else {
            return vec![];
        };

        let note = note.filter(|n| !n.is_empty());
        if existing.note == note {
            return vec![];
        }

        vec![CartEvent::note_updated(key, note)]
    }

    /// Removes a line if present.
    pub fn remove_item(&self, key: ItemKey) -> Vec<CartEvent> {
        if self.contains(&key) {
            vec![CartEvent::ItemRemoved(key)]
        } else {
            vec![]
        }
    }

    /// Empties the cart and resets the session.
    pub fn clear(&self) -> Vec<CartEvent> {
        if self.is_empty() && self.session.is_default() {
            return vec![];
        }

        vec![CartEvent::CartCleared]
    }

    /// Replaces the session context.
    pub fn set_session_info(&self, session: SessionContext) -> Vec<CartEvent> {
        if self.session == session {
            return vec![];
        }

        vec![CartEvent::SessionInfoSet(session)]
    }

    /// Starts a new table session: clears the cart, then sets the session.
    ///
    /// Both events are applied in one transition, so observers never see the
    /// cleared-but-tableless state.
    pub fn start_table_session(&self, session: SessionContext) -> Vec<CartEvent> {
        let mut events = self.clear();
        if !session.is_default() {
            events.push(CartEvent::SessionInfoSet(session));
        }
        events
    }
}

// Apply event helpers
impl Cart {
    fn find_mut(&mut self, key: &ItemKey) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.key() == *key)
    }

    fn apply_quantity_changed(&mut self, data: ItemQuantityChangedData) {
        if let Some(item) = self.find_mut(&data.key) {
            item.quantity = data.new_quantity;
        }
    }

    fn apply_note_updated(&mut self, data: ItemNoteUpdatedData) {
        if let Some(item) = self.find_mut(&data.key) {
            item.note = data.note;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{DishId, SpecId, TableId};

    fn dish(id: i64) -> DishId {
        DishId::new(id)
    }

    fn line(id: i64, price_units: i64, quantity: u32) -> LineItem {
        LineItem::new(dish(id), format!("Dish {id}"), Money::from_units(price_units), quantity)
    }

    fn run(cart: &mut Cart, decide: impl FnOnce(&Cart) -> Vec<CartEvent>) {
        let events = decide(cart);
        cart.apply_events(events);
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::default();
        let events = cart.add_item(line(1, 10, 2));
        assert!(matches!(events.as_slice(), [CartEvent::ItemAdded(_)]));
        cart.apply_events(events);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_count(), 2);
        assert_eq!(cart.total_amount(), Money::from_units(20));
    }

    #[test]
    fn test_add_same_key_merges_quantity() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));
        run(&mut cart, |c| c.add_item(line(1, 10, 3)));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total_amount(), Money::from_units(50));
    }

    #[test]
    fn test_merge_keeps_first_add_fields() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 1).with_note("mild")));

        let mut repriced = line(1, 99, 2);
        repriced.name = "Renamed".to_string();
        run(&mut cart, |c| c.add_item(repriced.with_note("hot")));

        let item = cart.get_item(&ItemKey::dish(dish(1))).unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.name, "Dish 1");
        assert_eq!(item.unit_price, Money::from_units(10));
        assert_eq!(item.note.as_deref(), Some("mild"));
    }

    #[test]
    fn test_different_specs_are_distinct_lines() {
        let mut cart = Cart::default();
        run(
            &mut cart,
            |c| c.add_item(line(1, 12, 1).with_spec(SpecId::new(1), "Small")),
        );
        run(
            &mut cart,
            |c| c.add_item(line(1, 15, 1).with_spec(SpecId::new(2), "Large")),
        );

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_count(), 2);
        assert_eq!(cart.total_amount(), Money::from_units(27));
    }

    #[test]
    fn test_base_dish_and_spec_are_distinct_lines() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 1)));
        run(
            &mut cart,
            |c| c.add_item(line(1, 12, 1).with_spec(SpecId::new(1), "Large")),
        );

        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let cart = Cart::default();
        assert!(cart.add_item(line(1, 10, 0)).is_empty());
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = Cart::default();
        for id in [3, 1, 2] {
            run(&mut cart, |c| c.add_item(line(id, 1, 1)));
        }
        run(&mut cart, |c| c.add_item(line(3, 1, 1)));

        let ids: Vec<i64> = cart.items().iter().map(|i| i.dish_id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));
        run(&mut cart, |c| c.update_quantity(ItemKey::dish(dish(1)), 7));

        assert_eq!(cart.items()[0].quantity, 7);
        assert_eq!(cart.total_amount(), Money::from_units(70));
    }

    #[test]
    fn test_update_quantity_to_zero_or_negative_removes() {
        for quantity in [0, -3] {
            let mut cart = Cart::default();
            run(&mut cart, |c| c.add_item(line(1, 10, 2)));
            let events = cart.update_quantity(ItemKey::dish(dish(1)), quantity);
            assert!(matches!(events.as_slice(), [CartEvent::ItemRemoved(_)]));
            cart.apply_events(events);
            assert!(cart.is_empty());
        }
    }

    #[test]
    fn test_update_quantity_unknown_key_is_noop() {
        let cart = Cart::default();
        assert!(cart.update_quantity(ItemKey::dish(dish(9)), 3).is_empty());
    }

    #[test]
    fn test_update_quantity_same_value_is_noop() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));
        assert!(cart.update_quantity(ItemKey::dish(dish(1)), 2).is_empty());
    }

    #[test]
    fn test_update_note() {
        let mut cart = Cart::default();
        let key = ItemKey::dish(dish(1));
        run(&mut cart, |c| c.add_item(line(1, 10, 1)));

        run(&mut cart, |c| c.update_note(key, Some("no onion".into())));
        assert_eq!(cart.get_item(&key).unwrap().note.as_deref(), Some("no onion"));

        run(&mut cart, |c| c.update_note(key, Some(String::new())));
        assert_eq!(cart.get_item(&key).unwrap().note, None);

        assert!(cart.update_note(ItemKey::dish(dish(2)), Some("x".into())).is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));
        run(&mut cart, |c| c.add_item(line(2, 5, 1)));

        run(&mut cart, |c| c.remove_item(ItemKey::dish(dish(1))));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_count(), 1);
    }

    #[test]
    fn test_remove_missing_item_is_noop() {
        let mut cart = Cart::default();
        run(
            &mut cart,
            |c| c.add_item(line(1, 10, 1).with_spec(SpecId::new(2), "B")),
        );

        let key = ItemKey::new(dish(1), Some(SpecId::new(1)));
        assert!(cart.remove_item(key).is_empty());
    }

    #[test]
    fn test_clear_resets_items_and_session() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));
        run(
            &mut cart,
            |c| c.set_session_info(SessionContext::new(TableId::new(5), "T5", 4)),
        );

        run(&mut cart, |c| c.clear());
        assert_eq!(cart.total_count(), 0);
        assert_eq!(cart.total_amount(), Money::zero());
        assert_eq!(cart.session(), &SessionContext::default());
    }

    #[test]
    fn test_clear_on_empty_cart_is_noop() {
        assert!(Cart::default().clear().is_empty());
    }

    #[test]
    fn test_start_table_session_clears_then_sets() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));

        let session = SessionContext::new(TableId::new(8), "T8", 3);
        let events = cart.start_table_session(session.clone());
        assert_eq!(
            events,
            vec![CartEvent::CartCleared, CartEvent::SessionInfoSet(session.clone())]
        );

        cart.apply_events(events);
        assert!(cart.is_empty());
        assert_eq!(cart.session(), &session);
    }

    #[test]
    fn test_serialized_layout() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));
        run(
            &mut cart,
            |c| c.set_session_info(SessionContext::new(TableId::new(5), "T5", 4)),
        );

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["tableId"], 5);
        assert_eq!(json["tableLabel"], "T5");
        assert_eq!(json["partySize"], 4);
        assert_eq!(json["items"][0]["quantity"], 2);

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_consistency_of_rehydrated_state() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 10, 2)));
        run(&mut cart, |c| c.add_item(line(1, 10, 1).with_spec(SpecId::new(3), "Large")));
        assert!(cart.is_consistent());

        let mut duplicated = cart.clone();
        duplicated.items.push(line(1, 10, 4));
        assert!(!duplicated.is_consistent());

        let mut zero_quantity = cart.clone();
        zero_quantity.items[0].quantity = 0;
        assert!(!zero_quantity.is_consistent());

        let mut empty_party = cart;
        empty_party.session.party_size = 0;
        assert!(!empty_party.is_consistent());
    }

    #[test]
    fn test_total_amount_saturates_instead_of_overflowing() {
        let mut cart = Cart::default();
        run(&mut cart, |c| c.add_item(line(1, 100_000_000, 1)));
        run(&mut cart, |c| c.update_quantity(ItemKey::dish(dish(1)), i64::MAX));
        run(&mut cart, |c| c.add_item(line(2, 1, 1)));

        assert_eq!(cart.get_item(&ItemKey::dish(dish(1))).unwrap().quantity, u32::MAX);
        assert_eq!(cart.total_amount(), Money::from_cents(i64::MAX));
    }
}
