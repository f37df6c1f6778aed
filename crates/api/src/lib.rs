use std::env;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use dayroute_agents::{PlannerConfig, RoutePlanner};
use dayroute_core::{PlanError, RouteRequest};
use dayroute_observability::AppMetrics;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub body_limit_bytes: usize,
    /// Empty means any origin may call the API.
    pub allowed_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            allowed_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let bind = env::var("DAYROUTE_BIND")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let body_limit_bytes = env::var("DAYROUTE_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_BODY_LIMIT_BYTES);
        let allowed_origins = env::var("DAYROUTE_ALLOWED_ORIGINS")
            .ok()
            .map(|value| parse_origins(&value))
            .unwrap_or_default();

        Self {
            bind,
            body_limit_bytes,
            allowed_origins,
        }
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub planner: Arc<RoutePlanner>,
    pub metrics: Arc<AppMetrics>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: dayroute_observability::MetricsSnapshot,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

pub fn build_app(config: &ApiConfig, planner_config: PlannerConfig) -> Router {
    let metrics = AppMetrics::shared();
    let planner = Arc::new(RoutePlanner::with_kmeans(planner_config, metrics.clone()));

    build_router(ApiState { planner, metrics }, config)
}

pub fn build_router(state: ApiState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/calculate_routes", post(calculate_routes))
        .route("/v1/calculate_routes", post(calculate_routes))
        .layer(build_cors_layer(&config.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn calculate_routes(
    State(state): State<ApiState>,
    Json(request): Json<RouteRequest>,
) -> Response {
    let planner = state.planner.clone();
    let outcome = tokio::task::spawn_blocking(move || planner.plan(&request)).await;

    match outcome {
        Ok(Ok(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(Err(error)) => plan_error_response(&error),
        Err(join_error) => {
            error!(error = %join_error, "route planning task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error",
                    message: "route planning did not complete".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn plan_error_response(error: &PlanError) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: error.code(),
            message: error.to_string(),
        }),
    )
        .into_response()
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer"),
    );
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );

    response
}
