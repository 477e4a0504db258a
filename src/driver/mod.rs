//! End-to-end feasibility decision for a TSP instance.

use std::fmt::Display;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::{ConfigError, SolverConfig};
use crate::constraints::{compile, ConstraintAssigner};
use crate::instance::{InputError, TspInstance};
use crate::points::PointSpace;
use crate::solver::{RelaxationOutcome, RelaxationSolver, Termination};


/// Two-valued answer of the feasibility procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The relaxation found no contradiction.
    Yes,
    /// The relaxation found a negative cycle.
    No,
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Yes => f.write_str("YES"),
            Decision::No => f.write_str("NO"),
        }
    }
}

/// Decision together with solver diagnostics.
#[derive(Debug, Clone)]
pub struct FeasibilityReport {
    pub decision: Decision,
    pub city_count: usize,
    pub point_count: usize,
    pub constraint_count: usize,
    pub outcome: RelaxationOutcome,
    pub elapsed: Duration,
}

impl FeasibilityReport {
    pub fn termination(&self) -> Termination {
        self.outcome.termination()
    }

    /// See [`RelaxationOutcome::cap_reached`].
    pub fn cap_reached(&self) -> bool {
        self.outcome.cap_reached()
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Runs points → constraints → compilation → relaxation for an instance.
#[derive(Debug, Clone, Default)]
pub struct FeasibilityDriver {
    solver: RelaxationSolver,
}

impl FeasibilityDriver {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails
    /// [`SolverConfig::validate`].
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            solver: RelaxationSolver::new(config)?,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        self.solver.config()
    }

    /// Returns [`Decision::Yes`] unless the relaxation finds a contradiction.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the instance is malformed.
    pub fn decide(&self, instance: &TspInstance) -> Result<Decision, InputError> {
        Ok(self.run(instance)?.decision)
    }

    /// Like [`decide`](Self::decide), keeping the solver diagnostics.
    pub fn run(&self, instance: &TspInstance) -> Result<FeasibilityReport, InputError> {
        instance.validate()?;
        let started = Instant::now();

        let points = PointSpace::for_cities(instance.city_count());
        let store = ConstraintAssigner::new(self.config().encoding).assign(instance, &points);
        let network = compile(&points, &store);

        info!(
            event = "solve_start",
            cities = instance.city_count(),
            points = points.len(),
            constraints = network.constraint_count(),
        );

        let outcome = self.solver.solve(&network);
        let decision = if outcome.is_feasible() {
            Decision::Yes
        } else {
            Decision::No
        };
        let elapsed = started.elapsed();

        info!(
            event = "solve_end",
            decision = %decision,
            termination = %outcome.termination(),
            iterations = outcome.iterations(),
            elapsed_ms = saturating_millis(elapsed),
        );

        Ok(FeasibilityReport {
            decision,
            city_count: instance.city_count(),
            point_count: points.len(),
            constraint_count: network.constraint_count(),
            outcome,
            elapsed,
        })
    }
}
