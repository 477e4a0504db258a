//! Seeded instance factory.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{InputError, TspInstance};

/// How distances of a generated instance are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Symmetric integer distances drawn uniformly from the distance range.
    #[default]
    Random,
    /// Integer coordinates in `[0, max_distance]²`, Euclidean distances.
    Euclidean,
}

/// Parameters of a generated instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub city_count: usize,
    pub min_distance: u32,
    pub max_distance: u32,
    pub seed: u64,
    #[serde(default)]
    pub mode: GenerationMode,
    pub threshold: f64,
}

impl InstanceSpec {
    pub fn new(city_count: usize, threshold: f64) -> Self {
        Self {
            city_count,
            min_distance: 1,
            max_distance: 100,
            seed: 0,
            mode: GenerationMode::Random,
            threshold,
        }
    }

    pub fn with_distance_range(mut self, min_distance: u32, max_distance: u32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Generates the instance. Identical specs give identical instances.
    ///
    /// # Errors
    ///
    /// - `InvalidDistanceRange` if `min_distance > max_distance`
    /// - `NonFiniteThreshold` if the threshold is NaN or infinite
    pub fn generate(&self) -> Result<TspInstance, InputError> {
        if self.min_distance > self.max_distance {
            return Err(InputError::InvalidDistanceRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        match self.mode {
            GenerationMode::Random => {
                let costs = random_costs(
                    &mut rng,
                    self.city_count,
                    self.min_distance,
                    self.max_distance,
                );
                TspInstance::new(costs, self.threshold)
            }
            GenerationMode::Euclidean => {
                let positions: Vec<(f64, f64)> = (0..self.city_count)
                    .map(|_| {
                        (
                            f64::from(rng.gen_range(0..=self.max_distance)),
                            f64::from(rng.gen_range(0..=self.max_distance)),
                        )
                    })
                    .collect();
                let costs = positions
                    .iter()
                    .map(|&(fx, fy)| {
                        positions
                            .iter()
                            .map(|&(tx, ty)| (fx - tx).hypot(fy - ty))
                            .collect()
                    })
                    .collect();
                Ok(TspInstance::new(costs, self.threshold)?.with_coordinates(positions))
            }
        }
    }
}

fn random_costs(rng: &mut StdRng, n: usize, min: u32, max: u32) -> Vec<Vec<f64>> {
    let mut costs = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = f64::from(rng.gen_range(min..=max));
            costs[i][j] = d;
            costs[j][i] = d;
        }
    }
    costs
}
