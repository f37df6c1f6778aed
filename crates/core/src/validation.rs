use std::collections::HashSet;

use crate::error::PlanError;
use crate::models::{Place, RouteRequest, UserLocation};

pub const TOO_FEW_PLACES_MESSAGE: &str =
    "Number of clusters (num_days) exceeds the number of places provided.";

/// Rejects requests the planner cannot serve. Runs before any clustering.
pub fn validate_route_request(request: &RouteRequest) -> Result<(), PlanError> {
    if request.num_days == 0 {
        return Err(PlanError::invalid("num_days must be at least 1."));
    }

    if request.places.len() < request.num_days {
        return Err(PlanError::invalid(TOO_FEW_PLACES_MESSAGE));
    }

    validate_user_location(&request.lokasi_user)?;

    let mut seen = HashSet::with_capacity(request.places.len());
    for place in &request.places {
        validate_place(place)?;
        if !seen.insert(place.place_id.as_str()) {
            return Err(PlanError::invalid(format!(
                "place_id '{}' appears more than once.",
                place.place_id
            )));
        }
    }

    Ok(())
}

fn validate_user_location(location: &UserLocation) -> Result<(), PlanError> {
    if !valid_latitude(location.latitude) || !valid_longitude(location.longitude) {
        return Err(PlanError::invalid(
            "lokasi_user must have latitude in [-90, 90] and longitude in [-180, 180].",
        ));
    }
    Ok(())
}

fn validate_place(place: &Place) -> Result<(), PlanError> {
    if place.place_id.trim().is_empty() {
        return Err(PlanError::invalid("place_id must not be empty."));
    }

    if !valid_latitude(place.latitude) || !valid_longitude(place.longitude) {
        return Err(PlanError::invalid(format!(
            "place '{}' has coordinates outside the valid range.",
            place.place_id
        )));
    }

    if !place.rating.is_finite() {
        return Err(PlanError::invalid(format!(
            "place '{}' has a non-numeric rating.",
            place.place_id
        )));
    }

    Ok(())
}

fn valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

fn valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}
