use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use dayroute_agents::PlannerConfig;
use dayroute_api::{build_app, ApiConfig};
use dayroute_core::{haversine_km, RoutesResponse};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let planner_config = PlannerConfig {
        restarts: 30,
        max_iterations: 300,
        ..PlannerConfig::default()
    };
    build_app(&ApiConfig::default(), planner_config)
}

fn place(id: &str, lat: f64, lon: f64, rating: f64, open: &str, close: &str) -> Value {
    json!({
        "place_id": id,
        "latitude": lat,
        "longitude": lon,
        "rating": rating,
        "open_time": open,
        "close_time": close
    })
}

fn scenario_body() -> Value {
    json!({
        "num_days": 2,
        "lokasi_user": { "latitude": 0.0, "longitude": 0.0 },
        "places": [
            place("A", 0.01, 0.01, 4.5, "08:00", "18:00"),
            place("B", 0.02, 0.02, 4.8, "09:00", "17:00"),
            place("C", 10.0, 10.0, 3.0, "07:00", "19:00"),
            place("D", 10.01, 10.01, 4.0, "10:00", "20:00")
        ]
    })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, parsed)
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["referrer-policy"], "no-referrer");
    assert_eq!(response.headers()["cache-control"], "no-store");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert!(parsed.get("metrics").is_some());
}

#[tokio::test]
async fn calculates_routes_for_separated_groups() {
    let (status, body) = post_json(app(), "/calculate_routes", scenario_body()).await;
    assert_eq!(status, StatusCode::OK);

    let response: RoutesResponse = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(response.routes.len(), 2);
    assert_eq!(
        response.routes.iter().map(|r| r.cluster).collect::<Vec<_>>(),
        vec![1, 2]
    );

    let mut groups: Vec<Vec<String>> = response
        .routes
        .iter()
        .map(|route| route.places.iter().map(|v| v.place_id.clone()).collect())
        .collect();
    groups.sort();
    assert_eq!(groups, vec![vec!["A", "B"], vec!["C", "D"]]);

    let near = response
        .routes
        .iter()
        .find(|route| route.places[0].place_id == "A")
        .unwrap();
    let expected = haversine_km(&(0.0, 0.0), &(0.01, 0.01))
        + haversine_km(&(0.01, 0.01), &(0.02, 0.02));
    assert!((near.total_distance - expected).abs() < 1e-9);
    assert_eq!(near.distances.len(), 1);
    assert_eq!(near.distances[0].from, "A");
    assert_eq!(near.distances[0].to, "B");

    let first_visit = &body["routes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|route| route["places"][0]["place_id"] == "A")
        .unwrap()["places"][0];
    assert_eq!(first_visit["open_time"], "08:00");
    assert_eq!(first_visit["close_time"], "18:00");
}

#[tokio::test]
async fn versioned_path_serves_the_same_plan() {
    let (_, legacy) = post_json(app(), "/calculate_routes", scenario_body()).await;
    let (status, versioned) = post_json(app(), "/v1/calculate_routes", scenario_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(legacy, versioned);
}

#[tokio::test]
async fn too_many_days_is_a_bad_request() {
    let mut body = scenario_body();
    body["num_days"] = json!(5);

    let (status, parsed) = post_json(app(), "/calculate_routes", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parsed["error"], "invalid_request");
    assert_eq!(
        parsed["message"],
        "Number of clusters (num_days) exceeds the number of places provided."
    );
}

#[tokio::test]
async fn zero_days_is_a_bad_request() {
    let mut body = scenario_body();
    body["num_days"] = json!(0);

    let (status, _) = post_json(app(), "/calculate_routes", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_time_is_rejected_before_planning() {
    let body = json!({
        "num_days": 1,
        "lokasi_user": { "latitude": 0.0, "longitude": 0.0 },
        "places": [place("A", 0.01, 0.01, 4.5, "eight", "18:00")]
    });

    let (status, _) = post_json(app(), "/calculate_routes", body).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn every_day_is_capped_and_time_ordered() {
    let places: Vec<Value> = (0..12)
        .map(|i| {
            let offset = f64::from(i) * 0.002;
            let hour = 6 + (i * 7) % 12;
            place(
                &format!("p{i}"),
                -6.2 + offset,
                106.8 + offset,
                3.0 + f64::from(i % 5) * 0.4,
                &format!("{hour:02}:00"),
                "22:00",
            )
        })
        .collect();
    let body = json!({
        "num_days": 2,
        "lokasi_user": { "latitude": -6.2, "longitude": 106.8 },
        "places": places,
        "seed": 99
    });

    let (status, parsed) = post_json(app(), "/calculate_routes", body).await;
    assert_eq!(status, StatusCode::OK);

    let response: RoutesResponse = serde_json::from_value(parsed).unwrap();
    assert_eq!(response.routes.len(), 2);
    for route in &response.routes {
        assert!(route.places.len() <= 5);
        assert!(route
            .places
            .windows(2)
            .all(|pair| pair[0].open_time <= pair[1].open_time));

        let legs: f64 = route.distances.iter().map(|leg| leg.distance).sum();
        let from_origin = route
            .places
            .first()
            .map(|visit| visit.distance_from_previous)
            .unwrap_or(0.0);
        assert!((route.total_distance - (from_origin + legs)).abs() < 1e-9);
    }
}

#[tokio::test]
async fn identical_requests_with_a_seed_are_byte_identical() {
    let mut body = scenario_body();
    body["seed"] = json!(2024);

    let first = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate_routes")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let second = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate_routes")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let first = to_bytes(first.into_body(), usize::MAX).await.unwrap();
    let second = to_bytes(second.into_body(), usize::MAX).await.unwrap();
    assert_eq!(first, second);
}
