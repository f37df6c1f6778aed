use std::env;

use dayroute_core::DEFAULT_MAX_PLACES_PER_DAY;
use dayroute_ml::{KMeans, DEFAULT_MAX_ITERATIONS, DEFAULT_N_INIT, DEFAULT_TOLERANCE};
use serde::Serialize;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerConfig {
    pub restarts: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
    /// `None` means every request without its own seed gets a fresh random one.
    pub seed: Option<u64>,
    pub max_places_per_day: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            restarts: DEFAULT_N_INIT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            seed: Some(DEFAULT_SEED),
            max_places_per_day: DEFAULT_MAX_PLACES_PER_DAY,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `DAYROUTE_*` settings through `lookup`. Unparseable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let restarts = lookup("DAYROUTE_KMEANS_RESTARTS")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.restarts);
        let max_iterations = lookup("DAYROUTE_KMEANS_MAX_ITER")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.max_iterations);
        let tolerance = lookup("DAYROUTE_KMEANS_TOLERANCE")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(defaults.tolerance);
        let seed = match lookup("DAYROUTE_SEED").map(|value| value.trim().to_lowercase()) {
            Some(value) if value == "none" || value == "random" => None,
            Some(value) => value.parse::<u64>().ok().or(defaults.seed),
            None => defaults.seed,
        };
        let max_places_per_day = lookup("DAYROUTE_MAX_PLACES_PER_DAY")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.max_places_per_day);

        Self {
            restarts,
            max_iterations,
            tolerance,
            seed,
            max_places_per_day,
        }
    }

    pub fn kmeans(&self) -> KMeans {
        KMeans::new(self.restarts, self.max_iterations, self.tolerance)
    }
}
