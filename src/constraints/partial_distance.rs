//! Merged interval constraints between unordered pairs of points.

use std::collections::HashMap;
use std::fmt::Display;

use crate::points::PointId;

use super::{lower_max, upper_min};

/// Interval `[low, high]` bounding the unknown distance between two points.
///
/// An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialDistance {
    low: Option<f64>,
    high: Option<f64>,
}

impl PartialDistance {
    /// Creates an interval, collapsing infinite bounds to absent.
    pub fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self {
            low: lower_max(low, None),
            high: upper_min(high, None),
        }
    }

    /// The unconstrained interval `(−∞, +∞)`.
    pub const fn unbounded() -> Self {
        Self {
            low: None,
            high: None,
        }
    }

    pub const fn low(&self) -> Option<f64> {
        self.low
    }

    pub const fn high(&self) -> Option<f64> {
        self.high
    }

    pub const fn is_unbounded(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// True when the bounds cross, i.e. no distance satisfies the interval.
    pub fn is_empty(&self) -> bool {
        matches!((self.low, self.high), (Some(low), Some(high)) if low > high)
    }

    /// Intersection of two intervals.
    pub fn intersect(&self, other: &PartialDistance) -> PartialDistance {
        PartialDistance {
            low: lower_max(self.low, other.low),
            high: upper_min(self.high, other.high),
        }
    }
}

impl Display for PartialDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.low {
            Some(low) => write!(f, "[{low:.3}, ")?,
            None => write!(f, "(-inf, ")?,
        }
        match self.high {
            Some(high) => write!(f, "{high:.3}]"),
            None => write!(f, "+inf)"),
        }
    }
}

/// Canonical key of an unordered pair: smaller index first.
fn pair_key(p: PointId, q: PointId) -> (PointId, PointId) {
    if p <= q {
        (p, q)
    } else {
        (q, p)
    }
}

/// One [`PartialDistance`] per unordered pair of distinct points.
///
/// # Invariants
///
/// - Self-pairs are never stored
/// - `set_constraint` only tightens; entries are never removed
/// - The stored interval is the intersection of every interval ever set for
///   the pair, independent of call order
#[derive(Debug, Clone, Default)]
pub struct PartialDistanceStore {
    intervals: HashMap<(PointId, PointId), PartialDistance>,
}

impl PartialDistanceStore {
    pub fn new() -> Self {
        Self {
            intervals: HashMap::new(),
        }
    }

    /// Merges `(low, high)` into the interval of the pair `{p, q}`.
    ///
    /// No-op when `p == q`.
    pub fn set_constraint(
        &mut self,
        p: PointId,
        q: PointId,
        low: Option<f64>,
        high: Option<f64>,
    ) {
        if p == q {
            return;
        }
        let incoming = PartialDistance::new(low, high);
        let entry = self
            .intervals
            .entry(pair_key(p, q))
            .or_insert_with(PartialDistance::unbounded);
        *entry = entry.intersect(&incoming);
        if entry.is_empty() {
            tracing::debug!(%p, %q, interval = %entry, "partial distance interval is empty");
        }
    }

    /// Returns the interval of the pair `{p, q}`, unbounded if never set.
    pub fn get_constraint(&self, p: PointId, q: PointId) -> PartialDistance {
        self.intervals
            .get(&pair_key(p, q))
            .copied()
            .unwrap_or_default()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates `((p, q), interval)` with `p < q`, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = ((PointId, PointId), PartialDistance)> + '_ {
        self.intervals.iter().map(|(&key, &interval)| (key, interval))
    }
}
