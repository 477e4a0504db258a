//! Lazy, lexicographically ordered index combinations.
//!
//! The triangle and quadrangle passes visit every strictly increasing triple
//! and quadruple of point indices. Materializing those lists costs O(n³) and
//! O(n⁴) memory; [`IndexCombinations`] yields them one at a time instead, in
//! the same ascending lexicographic order, and can be restarted by building a
//! new one (or cloning an unstarted one).

use std::iter::FusedIterator;

/// All strictly increasing `K`-tuples over `0..n`, lexicographically.
#[derive(Debug, Clone)]
pub struct IndexCombinations<const K: usize> {
    n: usize,
    next: Option<[usize; K]>,
}

/// Strictly increasing triples `(a, b, c)`.
pub type Triangles = IndexCombinations<3>;

/// Strictly increasing quadruples `(p, q, r, s)`.
pub type Quadrangles = IndexCombinations<4>;

impl<const K: usize> IndexCombinations<K> {
    pub fn new(n: usize) -> Self {
        let next = (K <= n).then(|| std::array::from_fn(|i| i));
        Self { n, next }
    }

    /// Number of combinations produced by a fresh sequence, `C(n, K)`.
    pub fn total(n: usize) -> u128 {
        if K > n {
            return 0;
        }
        (0..K).fold(1u128, |acc, i| acc * (n - i) as u128 / (i as u128 + 1))
    }

    fn advance(&mut self) {
        let Some(current) = self.next.as_mut() else {
            return;
        };
        // Rightmost slot that can still move up.
        let slot = (0..K).rev().find(|&i| current[i] < self.n - K + i);
        match slot {
            Some(i) => {
                current[i] += 1;
                for j in (i + 1)..K {
                    current[j] = current[j - 1] + 1;
                }
            }
            None => self.next = None,
        }
    }
}

impl<const K: usize> Iterator for IndexCombinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.advance();
        Some(current)
    }
}

impl<const K: usize> FusedIterator for IndexCombinations<K> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangles_over_four_points() {
        let triples: Vec<[usize; 3]> = Triangles::new(4).collect();
        assert_eq!(triples, vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]);
    }

    #[test]
    fn quadrangles_over_five_points() {
        let quads: Vec<[usize; 4]> = Quadrangles::new(5).collect();
        assert_eq!(
            quads,
            vec![
                [0, 1, 2, 3],
                [0, 1, 2, 4],
                [0, 1, 3, 4],
                [0, 2, 3, 4],
                [1, 2, 3, 4],
            ]
        );
    }

    #[test]
    fn too_few_points_yield_nothing() {
        assert_eq!(Triangles::new(2).count(), 0);
        assert_eq!(Quadrangles::new(3).count(), 0);
        assert_eq!(Quadrangles::new(0).count(), 0);
    }

    #[test]
    fn exactly_k_points_yield_one() {
        assert_eq!(Triangles::new(3).collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn count_matches_binomial() {
        for n in 0..12 {
            assert_eq!(Triangles::new(n).count() as u128, Triangles::total(n));
            assert_eq!(Quadrangles::new(n).count() as u128, Quadrangles::total(n));
        }
        assert_eq!(Triangles::total(7), 35);
        assert_eq!(Quadrangles::total(7), 35);
    }

    #[test]
    fn order_is_strictly_lexicographic() {
        let quads: Vec<[usize; 4]> = Quadrangles::new(9).collect();
        for window in quads.windows(2) {
            assert!(window[0] < window[1]);
        }
        for q in &quads {
            assert!(q[0] < q[1] && q[1] < q[2] && q[2] < q[3]);
        }
    }

    #[test]
    fn clone_restarts_the_sequence() {
        let fresh = Triangles::new(6);
        let first: Vec<_> = fresh.clone().collect();
        let second: Vec<_> = fresh.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn exhausted_sequence_stays_exhausted() {
        let mut triples = Triangles::new(3);
        assert!(triples.next().is_some());
        assert!(triples.next().is_none());
        assert!(triples.next().is_none());
    }
}
