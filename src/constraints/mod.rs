//! Partial-distance constraints and their compilation into difference
//! constraints.
//!
//! - [`PartialDistanceStore`] holds one merged interval per unordered pair
//!   of points
//! - [`ConstraintAssigner`] writes the TSP encoding into a store
//! - [`compile`] turns a store into a [`CompiledNetwork`] of directed
//!   difference constraints plus the triangle and quadrangle index sequences

pub mod assign;
pub mod combinations;
pub mod compile;
pub mod partial_distance;

pub use assign::ConstraintAssigner;
pub use combinations::{IndexCombinations, Quadrangles, Triangles};
pub use compile::{compile, CompiledNetwork, DifferenceConstraint, Relation};
pub use partial_distance::{PartialDistance, PartialDistanceStore};

/// Tighter of two lower bounds; `None` stands for −∞.
pub fn lower_max(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    let merged = match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) | (None, x) => x,
    };
    merged.filter(|v| *v != f64::NEG_INFINITY)
}

/// Tighter of two upper bounds; `None` stands for +∞.
pub fn upper_min(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    let merged = match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) | (None, x) => x,
    };
    merged.filter(|v| *v != f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_max_treats_absent_as_negative_infinity() {
        assert_eq!(lower_max(None, None), None);
        assert_eq!(lower_max(Some(2.0), None), Some(2.0));
        assert_eq!(lower_max(None, Some(-3.0)), Some(-3.0));
        assert_eq!(lower_max(Some(2.0), Some(5.0)), Some(5.0));
    }

    #[test]
    fn upper_min_treats_absent_as_positive_infinity() {
        assert_eq!(upper_min(None, None), None);
        assert_eq!(upper_min(Some(2.0), None), Some(2.0));
        assert_eq!(upper_min(Some(2.0), Some(5.0)), Some(2.0));
    }

    #[test]
    fn infinite_bounds_collapse_to_absent() {
        assert_eq!(lower_max(Some(f64::NEG_INFINITY), None), None);
        assert_eq!(upper_min(Some(f64::INFINITY), None), None);
        assert_eq!(upper_min(Some(f64::INFINITY), Some(f64::INFINITY)), None);
    }
}
