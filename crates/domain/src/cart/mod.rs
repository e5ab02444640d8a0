//! Shopping cart aggregate and related types.

mod aggregate;
mod checkout;
mod commands;
mod events;
mod service;
mod value_objects;

pub use aggregate::Cart;
pub use checkout::{CartItemRequest, CheckoutError, CreateOrderRequest};
pub use commands::*;
pub use events::{CartEvent, ItemNoteUpdatedData, ItemQuantityChangedData};
pub use service::CartEngine;
pub use value_objects::{ItemKey, LineItem, Money, SessionContext};
