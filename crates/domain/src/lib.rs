//! Client-side state engines for the restaurant ordering app.
//!
//! This crate provides:
//! - Aggregate, DomainEvent and Command traits
//! - A CommandHandler that applies, persists and publishes state changes
//! - The shopping cart engine with composite-key line identity
//! - The staff auth session
//! - The order-creation payload built from a cart

pub mod aggregate;
pub mod auth;
pub mod cart;
pub mod command;
pub mod error;

pub use aggregate::{Aggregate, DomainEvent, SnapshotCapable};
pub use auth::{AuthEvent, AuthService, AuthSession, Role, UserInfo};
pub use cart::{
    AddItem, Cart, CartEngine, CartEvent, CartItemRequest, CheckoutError, ClearCart,
    CreateOrderRequest, ItemKey, LineItem, Money, RemoveItem, SessionContext, SetSessionInfo,
    StartTableSession, UpdateNote, UpdateQuantity,
};
pub use command::{Command, CommandHandler, CommandResult, StateChange};
pub use error::DomainError;
