use serde::{Deserialize, Serialize};

/// Monotonic counter of applied state transitions.
///
/// Starts at 0 for fresh state and increments once per transition that
/// actually changed something. Persisted with every snapshot so a
/// rehydrated engine continues counting where it left off.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Creates a revision from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the initial revision (0) for fresh state.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the next revision.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw revision value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Revision {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_zero_and_next_increments() {
        let rev = Revision::initial();
        assert_eq!(rev.as_u64(), 0);
        assert_eq!(rev.next(), Revision::new(1));
        assert!(rev.next() > rev);
    }
}
