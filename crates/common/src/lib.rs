//! Identifier types shared by every crate in the workspace.

mod types;

pub use types::{
    CategoryId, DishId, OrderId, OrderItemId, SessionId, SpecId, TableId, UserId,
};
