use linfa::prelude::{Fit, Predict};
use linfa::DatasetBase;
use ndarray::Array2;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::debug;

use crate::{ClusterAssignment, ClusterError, PlaceClusterer, Point};

pub const DEFAULT_N_INIT: usize = 1000;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// k-means with k-means++ seeding and best-of-`n_init` restarts, backed by `linfa-clustering`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    pub n_init: usize,
    pub max_iterations: usize,
    /// Centroid movement below which a run counts as converged. Must be positive.
    pub tolerance: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            n_init: DEFAULT_N_INIT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl KMeans {
    pub fn new(n_init: usize, max_iterations: usize, tolerance: f64) -> Self {
        Self {
            n_init: n_init.max(1),
            max_iterations: max_iterations.max(1),
            tolerance: if tolerance > 0.0 {
                tolerance
            } else {
                DEFAULT_TOLERANCE
            },
        }
    }

    /// Partitions `points` into `k` clusters.
    ///
    /// All restarts share one RNG seeded with `seed`, so the same input and seed always
    /// give the same labels. Without a seed a random one is drawn and reported back in
    /// the assignment. A cluster that loses all its points keeps its centroid and stays
    /// empty.
    pub fn fit(
        &self,
        points: &[Point],
        k: usize,
        seed: Option<u64>,
    ) -> Result<ClusterAssignment, ClusterError> {
        if points.is_empty() {
            return Err(ClusterError::EmptyInput);
        }
        if k == 0 {
            return Err(ClusterError::ZeroClusters);
        }
        if k > points.len() {
            return Err(ClusterError::TooManyClusters {
                k,
                points: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|point| point.iter().any(|value| !value.is_finite()))
        {
            return Err(ClusterError::NonFinite { index });
        }

        let seed = seed.unwrap_or_else(rand::random);
        let observations = Array2::from(points.to_vec());
        let dataset = DatasetBase::from(observations.clone());

        let rng = Xoshiro256Plus::seed_from_u64(seed);
        let model = linfa_clustering::KMeans::params_with_rng(k, rng)
            .n_runs(self.n_init)
            .max_n_iterations(self.max_iterations as u64)
            .tolerance(self.tolerance)
            .fit(&dataset)?;

        let labels: Vec<usize> = model.predict(observations).targets.to_vec();
        let centroids: Vec<Point> = model
            .centroids()
            .rows()
            .into_iter()
            .map(|row| [row[0], row[1]])
            .collect();
        let inertia: f64 = points
            .iter()
            .zip(&labels)
            .map(|(point, &label)| squared_distance(point, &centroids[label]))
            .sum();

        debug!(
            seed,
            k,
            points = points.len(),
            restarts = self.n_init,
            inertia,
            "k-means finished"
        );

        Ok(ClusterAssignment {
            labels,
            centroids,
            num_clusters: k,
            inertia,
            seed,
        })
    }
}

impl PlaceClusterer for KMeans {
    fn model_name(&self) -> &'static str {
        "kmeans++"
    }

    fn assign(
        &self,
        points: &[Point],
        k: usize,
        seed: Option<u64>,
    ) -> Result<ClusterAssignment, ClusterError> {
        self.fit(points, k, seed)
    }
}

fn squared_distance(a: &Point, b: &Point) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}
