//! partdist - Partial-Distance relaxation for TSP feasibility
//!
//! Encodes a Traveling Salesman instance as a network of partial-distance
//! intervals between abstract points and checks the network for
//! contradictions with a Floyd–Warshall relaxation enriched by triangle and
//! quadrangle consistency checks.
//!
//! A `YES` decision means the relaxation found no contradiction. It is not a
//! constructive proof that a tour of cost at most the threshold exists.
//!
//! ```
//! use partdist::driver::{Decision, FeasibilityDriver};
//! use partdist::instance::TspInstance;
//!
//! let instance = TspInstance::new(
//!     vec![
//!         vec![0.0, 1.0, 1.0],
//!         vec![1.0, 0.0, 1.0],
//!         vec![1.0, 1.0, 0.0],
//!     ],
//!     3.0,
//! )
//! .unwrap();
//!
//! let decision = FeasibilityDriver::default().decide(&instance).unwrap();
//! assert_eq!(decision, Decision::Yes);
//! assert_eq!(decision.to_string(), "YES");
//! ```

pub mod config;
pub mod constraints;
pub mod driver;
pub mod instance;
pub mod points;
pub mod solver;

pub use config::SolverConfig;
pub use driver::{Decision, FeasibilityDriver, FeasibilityReport};
pub use instance::{InputError, TspInstance};
