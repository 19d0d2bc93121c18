//! Candidate pairs and the attributes the two parties are told

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered pair of integers `(i, j)` with `i <= j`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair(pub i64, pub i64);

impl Pair {
    /// Create a new pair
    pub fn new(i: i64, j: i64) -> Self {
        Self(i, j)
    }

    pub fn sum(&self) -> i64 {
        self.0 + self.1
    }

    pub fn product(&self) -> i64 {
        self.0 * self.1
    }

    /// Value revealed to the holder of `attribute`
    pub fn key(&self, attribute: Attribute) -> i64 {
        match attribute {
            Attribute::Sum => self.sum(),
            Attribute::Product => self.product(),
        }
    }

    /// Whether both members are equal
    pub fn is_self_pair(&self) -> bool {
        self.0 == self.1
    }
}

impl From<(i64, i64)> for Pair {
    fn from((i, j): (i64, i64)) -> Self {
        Self(i, j)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The value a party is told about the hidden pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Sum,
    Product,
}

/// A party's answer to "do you know the pair?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Claim {
    Knows,
    DoesNotKnow,
}

impl Claim {
    /// Whether a group of `size` pairs sharing a key is consistent with this claim
    pub fn admits_group_of(self, size: usize) -> bool {
        match self {
            Claim::Knows => size == 1,
            Claim::DoesNotKnow => size > 1,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Sum => write!(f, "sum"),
            Attribute::Product => write!(f, "product"),
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Claim::Knows => write!(f, "yes"),
            Claim::DoesNotKnow => write!(f, "no"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_keys() {
        let pair = Pair::new(3, 4);
        assert_eq!(pair.sum(), 7);
        assert_eq!(pair.product(), 12);
        assert_eq!(pair.key(Attribute::Sum), 7);
        assert_eq!(pair.key(Attribute::Product), 12);
        assert!(!pair.is_self_pair());
        assert!(Pair::new(2, 2).is_self_pair());
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(Pair::from((1, 4)).to_string(), "(1, 4)");
    }

    #[test]
    fn test_claim_group_sizes() {
        assert!(Claim::Knows.admits_group_of(1));
        assert!(!Claim::Knows.admits_group_of(2));
        assert!(Claim::DoesNotKnow.admits_group_of(2));
        assert!(!Claim::DoesNotKnow.admits_group_of(1));
    }
}
