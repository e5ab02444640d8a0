use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one engine session.
///
/// A new id is minted every time a store is opened, so log lines from two
/// app launches sharing one snapshot directory can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

// Backend primary keys are plain 64-bit integers. Each gets its own newtype
// so a dish id can never be passed where a table id is expected.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an ID from its raw value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of a menu dish.
    DishId
);

numeric_id!(
    /// Identifier of a priced dish specification (size, portion, ...).
    SpecId
);

numeric_id!(
    /// Identifier of a dining table. `0` means "no table selected".
    TableId
);

numeric_id!(
    /// Identifier of a placed order.
    OrderId
);

numeric_id!(
    /// Identifier of a staff account.
    UserId
);

numeric_id!(
    /// Identifier of a dish category.
    CategoryId
);

numeric_id!(
    /// Identifier of a single line on a placed order.
    OrderItemId
);

impl TableId {
    /// Returns true when no table has been chosen yet.
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}
