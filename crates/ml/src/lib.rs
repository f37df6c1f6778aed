mod kmeans;
mod scaler;

use thiserror::Error;

pub use kmeans::{KMeans, DEFAULT_MAX_ITERATIONS, DEFAULT_N_INIT, DEFAULT_TOLERANCE};
pub use scaler::StandardScaler;

/// A 2-feature sample, `[latitude, longitude]` before scaling.
pub type Point = [f64; 2];

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("cannot cluster an empty set of points")]
    EmptyInput,
    #[error("number of clusters must be at least 1")]
    ZeroClusters,
    #[error("requested {k} clusters but only {points} points are available")]
    TooManyClusters { k: usize, points: usize },
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("k-means failed: {0}")]
    KMeans(#[from] linfa_clustering::KMeansError),
}

/// Result of partitioning points into clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    /// One label in `0..num_clusters` per input point, in input order.
    pub labels: Vec<usize>,
    pub centroids: Vec<Point>,
    pub num_clusters: usize,
    /// Within-cluster sum of squared distances of the winning run.
    pub inertia: f64,
    pub seed: u64,
}

impl ClusterAssignment {
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_clusters];
        for &label in &self.labels {
            if let Some(size) = sizes.get_mut(label) {
                *size += 1;
            }
        }
        sizes
    }

    pub fn empty_clusters(&self) -> Vec<usize> {
        self.cluster_sizes()
            .iter()
            .enumerate()
            .filter(|(_, &size)| size == 0)
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub trait PlaceClusterer: Send + Sync {
    fn model_name(&self) -> &'static str;

    fn assign(
        &self,
        points: &[Point],
        k: usize,
        seed: Option<u64>,
    ) -> Result<ClusterAssignment, ClusterError>;
}
