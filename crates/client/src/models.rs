//! Request and response bodies of the restaurant backend.
//!
//! Prices travel as JSON numbers and are decoded into [`Decimal`]; use
//! [`to_money`] to bring them into the cart's integer-cent [`Money`].

use common::{CategoryId, DishId, OrderId, OrderItemId, SpecId, TableId, UserId};
use domain::{LineItem, Money, Role, UserInfo};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Converts a backend price into cents, rounding half away from zero.
///
/// Amounts outside the `i64` cent range saturate.
pub fn to_money(amount: Decimal) -> Money {
    let saturated = if amount.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|c| c.to_i64())
        .unwrap_or(saturated);
    Money::from_cents(cents)
}

/// Converts cents back into a backend price.
pub fn to_decimal(money: Money) -> Decimal {
    Decimal::new(money.cents(), 2)
}

// ========== Auth ==========

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Role codes used by the backend.
pub const ROLE_WAITER: i32 = 1;
pub const ROLE_ADMIN: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
    pub username: String,

    #[serde(default)]
    pub real_name: Option<String>,

    pub role: i32,
}

impl LoginResponse {
    /// Returns the profile to keep in the auth session.
    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            id: self.user_id,
            username: self.username.clone(),
            real_name: self.real_name.clone(),
            role: if self.role == ROLE_ADMIN {
                Role::Admin
            } else {
                Role::Waiter
            },
        }
    }
}

// ========== Dishes ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default)]
    pub status: i32,
}

/// A priced specification of a dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SpecId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<DishId>,

    pub name: String,
    pub price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl SpecItem {
    /// Returns true unless the spec is explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.status != Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: DishId,
    pub category_id: CategoryId,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub price: Decimal,

    #[serde(default)]
    pub image: Option<String>,

    /// Remaining stock; -1 means unlimited.
    #[serde(default)]
    pub stock: i32,

    #[serde(default)]
    pub is_recommend: i32,

    #[serde(default)]
    pub status: i32,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default)]
    pub has_specs: i32,

    #[serde(default)]
    pub specs: Vec<SpecItem>,
}

impl Dish {
    /// Returns true if the dish is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.status == 1
    }

    /// Returns true if the dish is ordered by specification.
    pub fn uses_specs(&self) -> bool {
        self.has_specs == 1
    }

    /// Builds a cart line for this dish, priced by `spec` when given.
    pub fn line_item(&self, spec: Option<&SpecItem>, quantity: u32) -> LineItem {
        let price = spec.map_or(self.price, |s| s.price);
        let mut item = LineItem::new(self.id, self.name.clone(), to_money(price), quantity);

        if let Some((spec_id, spec)) = spec.and_then(|s| s.id.map(|id| (id, s))) {
            item = item.with_spec(spec_id, spec.name.clone());
        }
        if let Some(image) = &self.image {
            item = item.with_image(image.clone());
        }
        item
    }
}

/// Filter for the dish list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishQuery {
    pub category_id: Option<CategoryId>,
    pub status: Option<i32>,
}

/// Body of the dish create and update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishForm {
    pub category_id: CategoryId,
    pub name: String,
    pub price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recommend: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecRequest {
    pub dish_id: DishId,
    pub name: String,
    pub price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

// ========== Tables ==========

/// Occupancy of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TableStatus {
    Free,
    Occupied,
    PendingClear,
}

impl TryFrom<i32> for TableStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TableStatus::Free),
            1 => Ok(TableStatus::Occupied),
            2 => Ok(TableStatus::PendingClear),
            other => Err(format!("unknown table status {other}")),
        }
    }
}

impl From<TableStatus> for i32 {
    fn from(status: TableStatus) -> Self {
        match status {
            TableStatus::Free => 0,
            TableStatus::Occupied => 1,
            TableStatus::PendingClear => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub table_no: String,

    #[serde(default)]
    pub name: Option<String>,

    /// 1 = fixed booth, 2 = temporary seat.
    #[serde(rename = "type", default)]
    pub table_type: i32,

    #[serde(default)]
    pub capacity: u32,

    pub status: TableStatus,

    #[serde(default)]
    pub sort_order: i32,
}

impl Table {
    /// Returns the label shown on the pad: the name if set, the number otherwise.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.table_no)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub table_no: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub table_type: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

// ========== Orders ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_no: String,
    pub table_id: TableId,

    #[serde(default)]
    pub table_no: Option<String>,

    #[serde(default)]
    pub customer_count: u32,

    pub total_amount: Decimal,

    #[serde(default)]
    pub discount_amount: Option<Decimal>,

    #[serde(default)]
    pub pay_amount: Option<Decimal>,

    #[serde(default)]
    pub pay_type: Option<i32>,

    #[serde(default)]
    pub status: i32,

    #[serde(default)]
    pub remark: Option<String>,

    #[serde(default)]
    pub create_time: Option<String>,

    #[serde(default)]
    pub pay_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub dish_id: DishId,
    pub dish_name: String,

    #[serde(default)]
    pub spec_id: Option<SpecId>,

    #[serde(default)]
    pub spec_name: Option<String>,

    #[serde(default)]
    pub dish_image: Option<String>,

    pub price: Decimal,
    pub quantity: u32,

    #[serde(default)]
    pub subtotal: Option<Decimal>,

    #[serde(default)]
    pub remark: Option<String>,

    #[serde(default)]
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order: Order,

    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Payment channel codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum PayType {
    Wechat,
    Alipay,
    Cash,
}

impl TryFrom<i32> for PayType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PayType::Wechat),
            2 => Ok(PayType::Alipay),
            3 => Ok(PayType::Cash),
            other => Err(format!("unknown pay type {other}")),
        }
    }
}

impl From<PayType> for i32 {
    fn from(pay_type: PayType) -> Self {
        match pay_type {
            PayType::Wechat => 1,
            PayType::Alipay => 2,
            PayType::Cash => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    pub pay_type: PayType,
    pub amount: Decimal,
}

// ========== Reports ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    pub total_revenue: Decimal,
    pub order_count: i64,

    #[serde(default)]
    pub avg_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDish {
    pub dish_name: String,
    pub total_quantity: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStats {
    pub table_no: String,

    #[serde(default)]
    pub table_name: Option<String>,

    pub order_count: i64,
    pub total_amount: Decimal,
}
