//! Upper bounds with an explicit "unbounded" value.

use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::Add;

/// Current upper bound of a matrix entry.
///
/// `Unbounded` absorbs addition and is never less than a finite bound, so a
/// relaxation through an unknown entry can never tighten anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Finite(f64),
    Unbounded,
}

impl Bound {
    pub const ZERO: Bound = Bound::Finite(0.0);

    pub const fn is_unbounded(self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    pub const fn finite(self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(v),
            Bound::Unbounded => None,
        }
    }

    /// True for a finite bound strictly below zero.
    pub fn is_negative(self) -> bool {
        matches!(self, Bound::Finite(v) if v < 0.0)
    }
}

impl Add for Bound {
    type Output = Bound;

    fn add(self, rhs: Bound) -> Bound {
        match (self, rhs) {
            (Bound::Finite(a), Bound::Finite(b)) => Bound::Finite(a + b),
            _ => Bound::Unbounded,
        }
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Bound::Finite(a), Bound::Finite(b)) => a.partial_cmp(b),
            (Bound::Finite(_), Bound::Unbounded) => Some(Ordering::Less),
            (Bound::Unbounded, Bound::Finite(_)) => Some(Ordering::Greater),
            (Bound::Unbounded, Bound::Unbounded) => Some(Ordering::Equal),
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Finite(v) => write!(f, "{v:.3}"),
            Bound::Unbounded => write!(f, "inf"),
        }
    }
}
