pub mod error;
pub mod geo;
pub mod models;
pub mod planner;
pub mod validation;

pub use error::PlanError;
pub use geo::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use models::*;
pub use planner::{
    build_day_route, build_day_routes, order_by_opening, select_top_rated,
    DEFAULT_MAX_PLACES_PER_DAY,
};
pub use validation::validate_route_request;
