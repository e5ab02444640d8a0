//! Order-creation payload built from the cart.

use common::{DishId, SpecId, TableId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cart, LineItem};

/// Reasons a cart cannot be turned into an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No table selected for the cart")]
    NoTable,
}

/// One line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub dish_id: DishId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_id: Option<SpecId>,

    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl From<&LineItem> for CartItemRequest {
    fn from(item: &LineItem) -> Self {
        Self {
            dish_id: item.dish_id,
            spec_id: item.spec_id,
            quantity: item.quantity,
            remark: item.note.clone(),
        }
    }
}

/// Body of the order-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub table_id: TableId,
    pub customer_count: u32,
    pub cart_items: Vec<CartItemRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl CreateOrderRequest {
    /// Builds the request from the current cart.
    ///
    /// Lines keep the cart's insertion order. An empty remark is dropped.
    pub fn from_cart(cart: &Cart, remark: Option<String>) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let session = cart.session();
        if session.table_id.is_unset() {
            return Err(CheckoutError::NoTable);
        }

        Ok(Self {
            table_id: session.table_id,
            customer_count: session.party_size,
            cart_items: cart.items().iter().map(CartItemRequest::from).collect(),
            remark: remark.filter(|r| !r.trim().is_empty()),
        })
    }
}
