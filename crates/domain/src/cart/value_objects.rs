//! Value objects for the cart domain.

use common::{DishId, SpecId, TableId};
use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (e.g., 1250 = 12.50)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Self {
            cents: units.saturating_mul(100),
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole-unit portion.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after units).
    pub fn cents_part(&self) -> i64 {
        (self.cents % 100).abs()
    }

    /// Multiplies by a quantity, saturating at the `i64` bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Identity of a cart line: the dish plus its optional specification.
///
/// Two keys are equal only when both dish ids match and the spec ids are
/// either both absent or both present and equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKey {
    pub dish_id: DishId,
    pub spec_id: Option<SpecId>,
}

impl ItemKey {
    /// Creates a key for a dish with an optional specification.
    pub fn new(dish_id: DishId, spec_id: Option<SpecId>) -> Self {
        Self { dish_id, spec_id }
    }

    /// Creates a key for the base dish without a specification.
    pub fn dish(dish_id: DishId) -> Self {
        Self::new(dish_id, None)
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.spec_id {
            Some(spec) => write!(f, "dish {} / spec {}", self.dish_id, spec),
            None => write!(f, "dish {}", self.dish_id),
        }
    }
}

/// One row in the cart.
///
/// Labels and price are captured when the dish is added and never
/// re-fetched; a later menu price change does not affect lines already
/// in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub dish_id: DishId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_id: Option<SpecId>,

    /// Dish name shown to the guest.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_name: Option<String>,

    pub unit_price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub quantity: u32,

    /// Free-text note for the kitchen ("no chili").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LineItem {
    /// Creates a line for the base dish.
    pub fn new(
        dish_id: DishId,
        name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            dish_id,
            spec_id: None,
            name: name.into(),
            spec_name: None,
            unit_price,
            image: None,
            quantity,
            note: None,
        }
    }

    /// Sets the specification this line is for.
    pub fn with_spec(mut self, spec_id: SpecId, spec_name: impl Into<String>) -> Self {
        self.spec_id = Some(spec_id);
        self.spec_name = Some(spec_name.into());
        self
    }

    /// Sets the display image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the kitchen note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns the identity key of this line.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            dish_id: self.dish_id,
            spec_id: self.spec_id,
        }
    }

    /// Returns `unit_price * quantity`.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// Table and party association for the current cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub table_id: TableId,
    pub table_label: String,
    pub party_size: u32,
}

impl SessionContext {
    /// Creates a session context. A party size of 0 is raised to 1.
    pub fn new(table_id: TableId, table_label: impl Into<String>, party_size: u32) -> Self {
        Self {
            table_id,
            table_label: table_label.into(),
            party_size: party_size.max(1),
        }
    }

    /// Returns true if this is the empty session (no table, party of one).
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            table_id: TableId::default(),
            table_label: String::new(),
            party_size: 1,
        }
    }
}
