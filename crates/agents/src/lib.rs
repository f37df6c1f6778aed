mod config;

use std::sync::Arc;
use std::time::Instant;

use dayroute_core::{
    build_day_routes, validate_route_request, PlanError, RouteRequest, RoutesResponse,
};
use dayroute_ml::{PlaceClusterer, Point, StandardScaler};
use dayroute_observability::AppMetrics;
use tracing::{info, instrument, warn};

pub use config::{PlannerConfig, DEFAULT_SEED};

/// Turns a route request into one itinerary per day.
#[derive(Clone)]
pub struct RoutePlanner {
    config: PlannerConfig,
    clusterer: Arc<dyn PlaceClusterer>,
    metrics: Arc<AppMetrics>,
}

impl RoutePlanner {
    pub fn new(
        config: PlannerConfig,
        clusterer: Arc<dyn PlaceClusterer>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            config,
            clusterer,
            metrics,
        }
    }

    /// Planner backed by k-means built from `config`.
    pub fn with_kmeans(config: PlannerConfig, metrics: Arc<AppMetrics>) -> Self {
        let clusterer = Arc::new(config.kmeans());
        Self::new(config, clusterer, metrics)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    #[instrument(
        skip(self, request),
        fields(num_days = request.num_days, places = request.places.len())
    )]
    pub fn plan(&self, request: &RouteRequest) -> Result<RoutesResponse, PlanError> {
        let started = Instant::now();
        self.metrics.inc_request();

        if let Err(error) = validate_route_request(request) {
            self.metrics.inc_rejected();
            warn!(error = %error, "route request rejected");
            return Err(error);
        }

        let coordinates: Vec<Point> = request
            .places
            .iter()
            .map(|place| [place.latitude, place.longitude])
            .collect();
        let (_, scaled) = StandardScaler::fit_transform(&coordinates);

        let seed = request.seed.or(self.config.seed);
        let assignment = self
            .clusterer
            .assign(&scaled, request.num_days, seed)
            .map_err(|error| PlanError::clustering(error.to_string()))?;

        for cluster in assignment.empty_clusters() {
            warn!(
                cluster = cluster + 1,
                "cluster received no places, emitting an empty day"
            );
        }

        let routes = build_day_routes(
            &request.places,
            &assignment.labels,
            request.num_days,
            &request.lokasi_user,
            self.config.max_places_per_day,
        );

        let dropped: usize = assignment
            .cluster_sizes()
            .iter()
            .map(|size| size.saturating_sub(self.config.max_places_per_day))
            .sum();
        let empty_days = routes.iter().filter(|route| route.is_empty()).count();

        self.metrics.inc_plan();
        self.metrics.add_empty_days(empty_days);
        self.metrics.add_places_dropped(dropped);
        self.metrics.observe_latency(started.elapsed());

        info!(
            model = self.clusterer.model_name(),
            seed = assignment.seed,
            inertia = assignment.inertia,
            empty_days,
            dropped,
            "routes planned"
        );

        Ok(RoutesResponse { routes })
    }
}
