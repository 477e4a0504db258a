//! Dense matrix of tightest known upper bounds between points.

use crate::constraints::CompiledNetwork;

use super::Bound;

/// `n×n` row-major matrix; `get(i, j)` bounds the partial distance from
/// point `i` to point `j` from above.
///
/// # Invariants
///
/// - Entries only decrease
/// - A negative diagonal entry is a negative cycle and proves the network
///   inconsistent
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<Bound>,
    size: usize,
}

impl DistanceMatrix {
    /// Zero diagonal, unbounded everywhere else.
    pub fn new(size: usize) -> Self {
        let mut data = vec![Bound::Unbounded; size * size];
        for i in 0..size {
            data[i * size + i] = Bound::ZERO;
        }
        Self { data, size }
    }

    /// Creates the matrix for `network` and tightens it with every
    /// constraint of the network.
    pub fn seeded(network: &CompiledNetwork) -> Self {
        let mut matrix = Self::new(network.point_count());
        for constraint in network.constraints() {
            let (from, to, bound) = constraint.as_upper_bound();
            matrix.tighten(from.index(), to.index(), bound);
        }
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Bound {
        self.data[from * self.size + to]
    }

    /// Lowers entry `(from, to)` to `bound` if that is tighter.
    /// Returns whether the entry changed.
    pub fn tighten(&mut self, from: usize, to: usize, bound: f64) -> bool {
        let slot = &mut self.data[from * self.size + to];
        let candidate = Bound::Finite(bound);
        if candidate < *slot {
            *slot = candidate;
            true
        } else {
            false
        }
    }

    /// One Floyd–Warshall sweep over every intermediate point.
    /// Returns whether any entry was tightened.
    pub fn relax_sweep(&mut self) -> bool {
        let n = self.size;
        let mut changed = false;
        for k in 0..n {
            for a in 0..n {
                let via = self.data[a * n + k];
                if via.is_unbounded() {
                    continue;
                }
                for b in 0..n {
                    let candidate = via + self.data[k * n + b];
                    if candidate < self.data[a * n + b] {
                        self.data[a * n + b] = candidate;
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    /// First point with a negative diagonal entry, with that entry.
    pub fn negative_diagonal(&self) -> Option<(usize, f64)> {
        (0..self.size)
            .map(|i| (i, self.get(i, i)))
            .find(|(_, entry)| entry.is_negative())
            .and_then(|(i, entry)| entry.finite().map(|v| (i, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::DifferenceConstraint;
    use crate::points::PointId;

    fn p(index: usize) -> PointId {
        PointId::new(index)
    }

    #[test]
    fn new_matrix_has_zero_diagonal_and_unbounded_rest() {
        let m = DistanceMatrix::new(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { Bound::ZERO } else { Bound::Unbounded };
                assert_eq!(m.get(i, j), expected);
            }
        }
    }

    #[test]
    fn seeding_applies_both_relations() {
        let network = CompiledNetwork::from_constraints(
            2,
            [
                DifferenceConstraint::at_most(p(0), p(1), 1.0),
                DifferenceConstraint::at_least(p(0), p(1), 5.0),
            ],
        );
        let m = DistanceMatrix::seeded(&network);
        assert_eq!(m.get(0, 1), Bound::Finite(1.0));
        assert_eq!(m.get(1, 0), Bound::Finite(-5.0));
    }

    #[test]
    fn tighten_only_lowers() {
        let mut m = DistanceMatrix::new(2);
        assert!(m.tighten(0, 1, 4.0));
        assert!(!m.tighten(0, 1, 6.0));
        assert!(!m.tighten(0, 1, 4.0));
        assert!(m.tighten(0, 1, 3.0));
        assert_eq!(m.get(0, 1), Bound::Finite(3.0));
    }

    #[test]
    fn sweep_computes_shortest_paths() {
        let mut m = DistanceMatrix::new(4);
        m.tighten(0, 1, 2.0);
        m.tighten(1, 2, 3.0);
        m.tighten(2, 3, 1.0);
        m.tighten(0, 3, 10.0);

        assert!(m.relax_sweep());
        assert_eq!(m.get(0, 2), Bound::Finite(5.0));
        assert_eq!(m.get(0, 3), Bound::Finite(6.0));
        assert_eq!(m.get(3, 0), Bound::Unbounded);
        assert!(!m.relax_sweep());
    }

    #[test]
    fn sweep_exposes_negative_cycle() {
        let mut m = DistanceMatrix::new(2);
        m.tighten(0, 1, 1.0);
        m.tighten(1, 0, -5.0);
        assert_eq!(m.negative_diagonal(), None);

        m.relax_sweep();
        let (_, value) = m.negative_diagonal().unwrap();
        assert!(value <= -4.0);
    }
}
