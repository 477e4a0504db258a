//! TSP instance records and their validation.
//!
//! A [`TspInstance`] is the only input the feasibility pipeline accepts. The
//! city count is the number of rows of the cost matrix; coordinates are
//! optional and carried along for callers that want to draw the cities, the
//! relaxation itself never reads them.

mod error;
pub mod generate;

pub use error::InputError;
pub use generate::{GenerationMode, InstanceSpec};

use serde::{Deserialize, Serialize};

/// A TSP decision instance: is there a tour of cost at most `threshold`?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspInstance {
    costs: Vec<Vec<f64>>,
    threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinates: Option<Vec<(f64, f64)>>,
}

impl TspInstance {
    /// Creates a validated instance from a square cost matrix and a threshold.
    ///
    /// # Errors
    ///
    /// See [`TspInstance::validate`].
    pub fn new(costs: Vec<Vec<f64>>, threshold: f64) -> Result<Self, InputError> {
        let instance = Self {
            costs,
            threshold,
            coordinates: None,
        };
        instance.validate()?;
        Ok(instance)
    }

    /// Attaches 2D coordinates, one per city.
    pub fn with_coordinates(mut self, coordinates: Vec<(f64, f64)>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Checks the instance is well formed.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if any row length differs from the row count
    /// - `NonFiniteThreshold` if the threshold is NaN or infinite
    /// - `NonFiniteDistance` / `NegativeDistance` for bad off-diagonal costs
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.threshold.is_finite() {
            return Err(InputError::NonFiniteThreshold(self.threshold));
        }

        let n = self.costs.len();
        for (from, row) in self.costs.iter().enumerate() {
            if row.len() != n {
                return Err(InputError::DimensionMismatch {
                    row: from,
                    expected: n,
                    found: row.len(),
                });
            }
            for (to, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(InputError::NonFiniteDistance { from, to });
                }
                if value < 0.0 {
                    return Err(InputError::NegativeDistance { from, to, value });
                }
            }
        }
        Ok(())
    }

    pub fn city_count(&self) -> usize {
        self.costs.len()
    }

    /// Cost of travelling from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from][to]
    }

    pub fn costs(&self) -> &[Vec<f64>] {
        &self.costs
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn coordinates(&self) -> Option<&[(f64, f64)]> {
        self.coordinates.as_deref()
    }
}
