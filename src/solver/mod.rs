//! Fixed-point relaxation of a compiled constraint network.
//!
//! Each iteration runs:
//!
//! 1. **Sweep**: one Floyd–Warshall pass tightening every entry through every
//!    intermediate point
//! 2. **Contradiction check**: a negative diagonal entry ends the solve as
//!    infeasible
//! 3. **Triangle pass** and 4. **Quadrangle pass**: higher-order checks from
//!    [`expansion`]; a violation counts as a change but repairs nothing
//!
//! The loop stops after an iteration without change, at the iteration cap
//! (`n²` unless configured), or at the configured deadline. Feasibility is
//! decided by a final diagonal check, and how the loop ended is reported
//! separately as a [`Termination`].
//!
//! # Module Structure
//!
//! - [`bound`] - upper bound with an explicit unbounded value
//! - [`matrix`] - the distance matrix and the sweep
//! - [`expansion`] - triangle and quadrangle checks

mod bound;
pub mod expansion;
mod matrix;

pub use bound::Bound;
pub use expansion::{ExpansionCheck, PassReport, Term};
pub use matrix::DistanceMatrix;

use std::fmt::Display;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::{ConfigError, SolverConfig};
use crate::constraints::CompiledNetwork;
use expansion::{quadrangle_checks, run_pass, triangle_checks};

/// How the relaxation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// An iteration changed nothing.
    Converged,
    /// A negative diagonal entry was found.
    Contradiction,
    /// The iteration cap was hit while iterations were still changing.
    CapReached,
    /// The deadline passed before a fixed point was reached.
    DeadlineReached,
}

impl Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Termination::Converged => "converged",
            Termination::Contradiction => "contradiction",
            Termination::CapReached => "cap_reached",
            Termination::DeadlineReached => "deadline_reached",
        };
        f.write_str(s)
    }
}

/// Result of one solve.
#[derive(Debug, Clone)]
pub struct RelaxationOutcome {
    feasible: bool,
    termination: Termination,
    iterations: usize,
    matrix: DistanceMatrix,
}

impl RelaxationOutcome {
    /// True when no negative diagonal entry was found.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// True when the decision was produced by exhausting the iteration cap
    /// rather than by reaching a fixed point.
    pub fn cap_reached(&self) -> bool {
        self.termination == Termination::CapReached
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Final matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> DistanceMatrix {
        self.matrix
    }
}

/// Runs the relaxation loop over a [`CompiledNetwork`].
#[derive(Debug, Clone, Default)]
pub struct RelaxationSolver {
    config: SolverConfig,
}

impl RelaxationSolver {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails
    /// [`SolverConfig::validate`].
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `network` on a freshly seeded matrix.
    pub fn solve(&self, network: &CompiledNetwork) -> RelaxationOutcome {
        let started = Instant::now();
        let deadline = self.config.deadline().map(|budget| started + budget);
        let cap = self.config.iteration_cap(network.point_count());
        let tolerance = self.config.expansion_tolerance;

        let mut matrix = DistanceMatrix::seeded(network);
        let mut iterations = 0;

        let termination = loop {
            if matrix.size() == 0 {
                break Termination::Converged;
            }
            if iterations >= cap {
                break Termination::CapReached;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break Termination::DeadlineReached;
            }
            iterations += 1;

            let swept = matrix.relax_sweep();
            if let Some((point, value)) = matrix.negative_diagonal() {
                debug!(iteration = iterations, point, value, "negative cycle");
                break Termination::Contradiction;
            }

            let triangles = if self.config.expansion.triangles {
                run_pass(&matrix, network.triangles(), triangle_checks, tolerance, deadline)
            } else {
                PassReport::default()
            };
            let quadrangles = if self.config.expansion.quadrangles && !triangles.interrupted {
                run_pass(&matrix, network.quadrangles(), quadrangle_checks, tolerance, deadline)
            } else {
                PassReport::default()
            };

            debug!(
                iteration = iterations,
                sweep_changed = swept,
                triangle_violations = triangles.violations,
                quadrangle_violations = quadrangles.violations,
            );

            if triangles.interrupted || quadrangles.interrupted {
                break Termination::DeadlineReached;
            }
            if !(swept || triangles.changed() || quadrangles.changed()) {
                break Termination::Converged;
            }
        };

        match termination {
            Termination::CapReached => warn!(cap, "relaxation stopped at the iteration cap"),
            Termination::DeadlineReached => {
                warn!(iterations, "relaxation stopped at the deadline")
            }
            Termination::Converged | Termination::Contradiction => {}
        }

        RelaxationOutcome {
            feasible: matrix.negative_diagonal().is_none(),
            termination,
            iterations,
            matrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::DifferenceConstraint;
    use crate::points::PointId;
    use std::time::Duration;

    fn p(index: usize) -> PointId {
        PointId::new(index)
    }

    #[test]
    fn single_point_is_feasible() {
        let network = CompiledNetwork::from_constraints(1, []);
        let outcome = RelaxationSolver::default().solve(&network);
        assert!(outcome.is_feasible());
        assert_eq!(outcome.termination(), Termination::Converged);
        assert_eq!(outcome.iterations(), 1);
        assert_eq!(outcome.matrix().get(0, 0), Bound::ZERO);
    }

    #[test]
    fn empty_network_is_feasible() {
        let network = CompiledNetwork::from_constraints(0, []);
        let outcome = RelaxationSolver::default().solve(&network);
        assert!(outcome.is_feasible());
        assert_eq!(outcome.iterations(), 0);
    }

    #[test]
    fn two_point_contradiction_is_found_within_two_iterations() {
        let network = CompiledNetwork::from_constraints(
            2,
            [
                DifferenceConstraint::at_most(p(0), p(1), 1.0),
                DifferenceConstraint::at_least(p(0), p(1), 5.0),
            ],
        );
        let outcome = RelaxationSolver::default().solve(&network);
        assert!(!outcome.is_feasible());
        assert_eq!(outcome.termination(), Termination::Contradiction);
        assert!(outcome.iterations() <= 2);
        assert!(outcome.matrix().get(0, 0).is_negative());
    }

    #[test]
    fn consistent_chain_converges() {
        let network = CompiledNetwork::from_constraints(
            3,
            [
                DifferenceConstraint::at_most(p(0), p(1), 2.0),
                DifferenceConstraint::at_most(p(1), p(2), 2.0),
                DifferenceConstraint::at_least(p(0), p(2), 1.0),
            ],
        );
        let outcome = RelaxationSolver::default().solve(&network);
        assert!(outcome.is_feasible());
        assert_eq!(outcome.termination(), Termination::Converged);
        assert!(!outcome.cap_reached());
        assert_eq!(outcome.matrix().get(0, 2), Bound::Finite(4.0));
        assert_eq!(outcome.matrix().get(2, 0), Bound::Finite(-1.0));
    }

    #[test]
    fn cap_exhaustion_is_reported() {
        let network = CompiledNetwork::from_constraints(
            3,
            [
                DifferenceConstraint::at_most(p(0), p(1), 2.0),
                DifferenceConstraint::at_most(p(1), p(2), 2.0),
            ],
        );
        let solver =
            RelaxationSolver::new(SolverConfig::default().with_max_iterations(1)).unwrap();
        let outcome = solver.solve(&network);
        assert!(outcome.cap_reached());
        assert_eq!(outcome.termination(), Termination::CapReached);
        assert_eq!(outcome.iterations(), 1);
        assert!(outcome.is_feasible());
    }

    #[test]
    fn expired_deadline_stops_before_first_iteration() {
        let network = CompiledNetwork::from_constraints(
            2,
            [DifferenceConstraint::at_most(p(0), p(1), 1.0)],
        );
        let solver =
            RelaxationSolver::new(SolverConfig::default().with_deadline(Duration::ZERO)).unwrap();
        let outcome = solver.solve(&network);
        assert_eq!(outcome.termination(), Termination::DeadlineReached);
        assert_eq!(outcome.iterations(), 0);
        assert!(outcome.is_feasible());
    }

    #[test]
    fn converged_matrix_passes_expansion_checks_again() {
        let network = CompiledNetwork::from_constraints(
            5,
            [
                DifferenceConstraint::at_most(p(0), p(1), 3.0),
                DifferenceConstraint::at_most(p(1), p(2), 1.5),
                DifferenceConstraint::at_most(p(2), p(3), 0.5),
                DifferenceConstraint::at_most(p(3), p(4), 2.0),
                DifferenceConstraint::at_most(p(4), p(0), 1.0),
                DifferenceConstraint::at_least(p(1), p(3), 0.25),
            ],
        );
        let outcome = RelaxationSolver::default().solve(&network);
        assert_eq!(outcome.termination(), Termination::Converged);

        let m = outcome.matrix();
        let tri = run_pass(m, network.triangles(), triangle_checks, 0.0, None);
        let quad = run_pass(m, network.quadrangles(), quadrangle_checks, 0.0, None);
        assert!(!tri.changed());
        assert!(!quad.changed());
        assert_eq!(tri.combinations, 10);
        assert_eq!(quad.combinations, 5);
    }

    #[test]
    fn disabled_passes_do_not_change_the_decision() {
        let network = CompiledNetwork::from_constraints(
            4,
            [
                DifferenceConstraint::at_most(p(0), p(1), 1.0),
                DifferenceConstraint::at_most(p(1), p(2), 1.0),
                DifferenceConstraint::at_most(p(2), p(3), 1.0),
                DifferenceConstraint::at_most(p(3), p(0), -4.0),
            ],
        );
        let full = RelaxationSolver::default().solve(&network);
        let bare = RelaxationSolver::new(SolverConfig::default().with_expansion(false, false))
            .unwrap()
            .solve(&network);
        assert!(!full.is_feasible());
        assert!(!bare.is_feasible());
    }

    #[test]
    fn agrees_with_bellman_ford_negative_cycle_search() {
        let networks = [
            CompiledNetwork::from_constraints(
                3,
                [
                    DifferenceConstraint::at_most(p(0), p(1), 1.0),
                    DifferenceConstraint::at_most(p(1), p(2), 1.0),
                    DifferenceConstraint::at_most(p(2), p(0), -1.5),
                ],
            ),
            CompiledNetwork::from_constraints(
                3,
                [
                    DifferenceConstraint::at_most(p(0), p(1), 1.0),
                    DifferenceConstraint::at_most(p(1), p(2), 1.0),
                    DifferenceConstraint::at_most(p(2), p(0), -2.0),
                ],
            ),
            CompiledNetwork::from_constraints(
                4,
                [
                    DifferenceConstraint::at_least(p(0), p(1), 2.0),
                    DifferenceConstraint::at_least(p(1), p(2), 2.0),
                    DifferenceConstraint::at_most(p(0), p(2), 3.0),
                    DifferenceConstraint::at_most(p(3), p(0), 0.0),
                ],
            ),
        ];

        for network in &networks {
            let graph = network.upper_bound_graph();
            let mut has_cycle = false;
            for source in graph.node_indices() {
                has_cycle |= petgraph::algo::find_negative_cycle(&graph, source).is_some();
            }
            let outcome = RelaxationSolver::default().solve(network);
            assert_eq!(outcome.is_feasible(), !has_cycle);
        }
    }

    #[test]
    fn repeated_solves_are_identical() {
        let network = CompiledNetwork::from_constraints(
            4,
            [
                DifferenceConstraint::at_most(p(0), p(1), 1.0),
                DifferenceConstraint::at_most(p(1), p(3), 2.5),
                DifferenceConstraint::at_least(p(2), p(3), 0.5),
                DifferenceConstraint::at_most(p(3), p(2), 4.0),
            ],
        );
        let solver = RelaxationSolver::default();
        let first = solver.solve(&network);
        let second = solver.solve(&network);
        assert_eq!(first.matrix(), second.matrix());
        assert_eq!(first.termination(), second.termination());
        assert_eq!(first.iterations(), second.iterations());
    }

    fn decimal_chain() -> CompiledNetwork {
        // 0.1 + 0.2 leaves a positive round-off residual on the 0 -> 2 path
        CompiledNetwork::from_constraints(
            3,
            [
                DifferenceConstraint::at_most(p(0), p(1), 0.1),
                DifferenceConstraint::at_most(p(1), p(2), 0.2),
            ],
        )
    }

    #[test]
    fn unrepaired_violation_runs_to_the_cap() {
        let network = decimal_chain();
        let first_sweep = RelaxationSolver::new(SolverConfig::default().with_max_iterations(1))
            .unwrap()
            .solve(&network);

        let outcome = RelaxationSolver::default().solve(&network);
        assert_eq!(outcome.termination(), Termination::CapReached);
        assert_eq!(outcome.iterations(), 9);
        assert!(outcome.is_feasible());
        assert_eq!(outcome.matrix(), first_sweep.matrix());
    }

    #[test]
    fn opt_in_tolerance_absorbs_round_off() {
        let solver =
            RelaxationSolver::new(SolverConfig::default().with_expansion_tolerance(1e-9)).unwrap();
        let outcome = solver.solve(&decimal_chain());
        assert_eq!(outcome.termination(), Termination::Converged);
        assert_eq!(outcome.iterations(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        for tolerance in [f64::NAN, -1.0] {
            let config = SolverConfig::default().with_expansion_tolerance(tolerance);
            assert!(matches!(
                RelaxationSolver::new(config),
                Err(ConfigError::Invalid(_))
            ));
        }
        let mut config = SolverConfig::default();
        config.encoding.epsilon = 0.0;
        assert!(RelaxationSolver::new(config).is_err());
    }

    #[test]
    fn termination_display() {
        assert_eq!(Termination::CapReached.to_string(), "cap_reached");
        assert_eq!(Termination::Converged.to_string(), "converged");
    }
}
