//! Solver configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```
//! use partdist::config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     max_iterations = 50
//!     deadline_ms = 2000
//!
//!     [expansion]
//!     quadrangles = false
//! "#).unwrap();
//!
//! assert_eq!(config.max_iterations, Some(50));
//! assert_eq!(config.deadline(), Some(Duration::from_secs(2)));
//! assert!(config.expansion.triangles);
//! assert!(!config.expansion.quadrangles);
//! assert_eq!(config.encoding.epsilon, 0.001);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Relaxation solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Iteration cap. `None` means `n²` for `n` points.
    pub max_iterations: Option<usize>,

    /// Wall-clock budget for one solve, in milliseconds.
    pub deadline_ms: Option<u64>,

    /// An expansion check is violated when its sum exceeds this value.
    /// Zero by default; a small positive value absorbs float round-off.
    pub expansion_tolerance: f64,

    pub expansion: ExpansionConfig,

    pub encoding: EncodingConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            deadline_ms: None,
            expansion_tolerance: 0.0,
            expansion: ExpansionConfig::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`SolverConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline_ms = Some(deadline.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    pub fn with_expansion_tolerance(mut self, tolerance: f64) -> Self {
        self.expansion_tolerance = tolerance;
        self
    }

    pub fn with_expansion(mut self, triangles: bool, quadrangles: bool) -> Self {
        self.expansion = ExpansionConfig {
            triangles,
            quadrangles,
        };
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Effective iteration cap for a network of `point_count` points.
    pub fn iteration_cap(&self, point_count: usize) -> usize {
        self.max_iterations
            .unwrap_or_else(|| point_count.saturating_mul(point_count))
    }

    /// Rejects values that would make the encoding or the checks meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.expansion_tolerance.is_finite() && self.expansion_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "expansion_tolerance must be finite and non-negative, got {}",
                self.expansion_tolerance
            )));
        }
        if !(self.encoding.epsilon.is_finite() && self.encoding.epsilon > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "encoding.epsilon must be finite and positive, got {}",
                self.encoding.epsilon
            )));
        }
        if !self.encoding.pivot_slack.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "encoding.pivot_slack must be finite, got {}",
                self.encoding.pivot_slack
            )));
        }
        Ok(())
    }
}

/// Toggles for the higher-order consistency passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExpansionConfig {
    pub triangles: bool,
    pub quadrangles: bool,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            triangles: true,
            quadrangles: true,
        }
    }
}

/// Constants of the TSP interval encoding.
///
/// The pivot bound is `(threshold + pivot_slack) · (cities + pivot_padding)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Upper bound tying the in and out representatives of a city.
    pub epsilon: f64,
    pub pivot_slack: f64,
    pub pivot_padding: usize,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            pivot_slack: 500.0,
            pivot_padding: 5,
        }
    }
}

impl EncodingConfig {
    /// Loose bound on pivot edges for an instance.
    pub fn pivot_bound(&self, threshold: f64, city_count: usize) -> f64 {
        (threshold + self.pivot_slack) * (city_count + self.pivot_padding) as f64
    }
}
