//! TSP encoding: which intervals tie which points together.

use crate::config::EncodingConfig;
use crate::instance::TspInstance;
use crate::points::PointSpace;

use super::PartialDistanceStore;

/// Writes the interval encoding of a TSP instance into a store.
///
/// For cities `i`, `j` (`i != j`), with `BIG` the pivot bound of
/// [`EncodingConfig::pivot_bound`]:
///
/// | pair                      | interval          |
/// |---------------------------|-------------------|
/// | `in(i)`, `out(i)`         | `(-inf, epsilon]` |
/// | `out(i)`, `in(j)`         | `[0, dist(i, j)]` |
/// | `pivot`, `in(i)`          | `[0, BIG]`        |
/// | `out(i)`, `pivot`         | `[0, BIG]`        |
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintAssigner {
    encoding: EncodingConfig,
}

impl ConstraintAssigner {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self { encoding }
    }

    /// Builds a fresh store holding the encoding of `instance`.
    pub fn assign(&self, instance: &TspInstance, points: &PointSpace) -> PartialDistanceStore {
        let mut store = PartialDistanceStore::new();
        self.assign_into(&mut store, instance, points);
        store
    }

    /// Merges the encoding of `instance` into an existing store.
    ///
    /// # Panics
    ///
    /// Panics if `points` was built for fewer cities than `instance` has.
    pub fn assign_into(
        &self,
        store: &mut PartialDistanceStore,
        instance: &TspInstance,
        points: &PointSpace,
    ) {
        let n = instance.city_count();
        let pivot = points.pivot();
        let big = self.encoding.pivot_bound(instance.threshold(), n);

        for i in 0..n {
            store.set_constraint(
                points.city_in(i),
                points.city_out(i),
                None,
                Some(self.encoding.epsilon),
            );
        }

        for i in 0..n {
            for j in (0..n).filter(|&j| j != i) {
                store.set_constraint(
                    points.city_out(i),
                    points.city_in(j),
                    Some(0.0),
                    Some(instance.cost(i, j)),
                );
            }
        }

        for i in 0..n {
            store.set_constraint(pivot, points.city_in(i), Some(0.0), Some(big));
            store.set_constraint(points.city_out(i), pivot, Some(0.0), Some(big));
        }
    }
}
