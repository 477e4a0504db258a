//! Triangle and quadrangle consistency checks.
//!
//! A check is a signed sum of directed matrix entries that must not exceed
//! zero. Checks only *detect*: a violated check keeps the relaxation loop
//! running but never repairs an entry.
//!
//! For a triple `(a, b, c)`:
//!
//! ```text
//! M[a][c] - M[a][b] - M[b][c]      <= 0   a -> c via b
//! M[c][a] - M[c][b] - M[b][a]      <= 0   c -> a via b
//! -(M[a][b] + M[b][c] + M[c][a])   <= 0   cycle a b c
//! -(M[c][b] + M[b][a] + M[a][c])   <= 0   cycle c b a
//! ```
//!
//! For a quadruple, each of the three perfect matchings `{pq, rs}`,
//! `{pr, qs}`, `{ps, qr}` is taken in both orders as a walk `x y z w`, and
//! each walk yields a path check and a cycle check:
//!
//! ```text
//! M[x][w] - M[x][y] - M[y][z] - M[z][w]     <= 0
//! -(M[x][y] + M[y][z] + M[z][w] + M[w][x])  <= 0
//! ```

use std::time::Instant;

use super::{Bound, DistanceMatrix};

/// Number of combinations visited between two deadline checks.
const DEADLINE_STRIDE: u64 = 4096;

/// One signed directed entry `coefficient · M[from][to]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coefficient: f64,
    pub from: usize,
    pub to: usize,
}

impl Term {
    const fn plus(from: usize, to: usize) -> Self {
        Self {
            coefficient: 1.0,
            from,
            to,
        }
    }

    const fn minus(from: usize, to: usize) -> Self {
        Self {
            coefficient: -1.0,
            from,
            to,
        }
    }
}

/// `sum(terms) <= 0` over `N` matrix entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionCheck<const N: usize> {
    terms: [Term; N],
}

impl<const N: usize> ExpansionCheck<N> {
    pub const fn new(terms: [Term; N]) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[Term; N] {
        &self.terms
    }

    /// Current value of the sum, or `None` if any entry is unbounded.
    pub fn evaluate(&self, matrix: &DistanceMatrix) -> Option<f64> {
        let mut sum = 0.0;
        for term in &self.terms {
            match matrix.get(term.from, term.to) {
                Bound::Finite(v) => sum += term.coefficient * v,
                Bound::Unbounded => return None,
            }
        }
        Some(sum)
    }

    /// True when the sum exceeds `tolerance`.
    pub fn is_violated(&self, matrix: &DistanceMatrix, tolerance: f64) -> bool {
        self.evaluate(matrix).is_some_and(|sum| sum > tolerance)
    }
}

/// The four checks of triple `(a, b, c)`.
pub fn triangle_checks([a, b, c]: [usize; 3]) -> [ExpansionCheck<3>; 4] {
    [
        ExpansionCheck::new([Term::plus(a, c), Term::minus(a, b), Term::minus(b, c)]),
        ExpansionCheck::new([Term::plus(c, a), Term::minus(c, b), Term::minus(b, a)]),
        ExpansionCheck::new([Term::minus(a, b), Term::minus(b, c), Term::minus(c, a)]),
        ExpansionCheck::new([Term::minus(c, b), Term::minus(b, a), Term::minus(a, c)]),
    ]
}

fn walk_checks([x, y, z, w]: [usize; 4]) -> [ExpansionCheck<4>; 2] {
    [
        ExpansionCheck::new([
            Term::plus(x, w),
            Term::minus(x, y),
            Term::minus(y, z),
            Term::minus(z, w),
        ]),
        ExpansionCheck::new([
            Term::minus(x, y),
            Term::minus(y, z),
            Term::minus(z, w),
            Term::minus(w, x),
        ]),
    ]
}

/// The twelve checks of quadruple `(p, q, r, s)`.
pub fn quadrangle_checks([p, q, r, s]: [usize; 4]) -> [ExpansionCheck<4>; 12] {
    let walks = [
        [p, q, r, s],
        [r, s, p, q],
        [p, r, q, s],
        [q, s, p, r],
        [p, s, q, r],
        [q, r, p, s],
    ];
    std::array::from_fn(|i| walk_checks(walks[i / 2])[i % 2])
}

/// Tally of one expansion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub combinations: u64,
    pub violations: u64,
    /// The deadline passed before every combination was visited.
    pub interrupted: bool,
}

impl PassReport {
    pub fn changed(&self) -> bool {
        self.violations > 0
    }
}

/// Evaluates `checks_of(combination)` for each combination against `matrix`.
pub fn run_pass<const K: usize, const N: usize, const C: usize>(
    matrix: &DistanceMatrix,
    combinations: impl Iterator<Item = [usize; K]>,
    checks_of: impl Fn([usize; K]) -> [ExpansionCheck<N>; C],
    tolerance: f64,
    deadline: Option<Instant>,
) -> PassReport {
    let mut report = PassReport::default();
    for combination in combinations {
        if report.combinations % DEADLINE_STRIDE == 0
            && deadline.is_some_and(|d| Instant::now() >= d)
        {
            report.interrupted = true;
            break;
        }
        report.combinations += 1;
        for check in checks_of(combination) {
            if check.is_violated(matrix, tolerance) {
                tracing::trace!(?combination, "expansion check violated");
                report.violations += 1;
            }
        }
    }
    report
}
