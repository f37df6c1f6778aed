use crate::geo::haversine_km;
use crate::models::{DayRoute, Place, PlaceVisit, RouteLeg, UserLocation};

/// Most places a single day will visit.
pub const DEFAULT_MAX_PLACES_PER_DAY: usize = 5;

/// Keeps the `cap` best-rated places, returned in their input order.
///
/// Equal ratings at the cut favour the place that came first.
pub fn select_top_rated<'a>(places: &[&'a Place], cap: usize) -> Vec<&'a Place> {
    if places.len() <= cap {
        return places.to_vec();
    }

    let mut ranked: Vec<(usize, &'a Place)> = places.iter().copied().enumerate().collect();
    ranked.sort_by(|(_, a), (_, b)| b.rating.total_cmp(&a.rating));
    ranked.truncate(cap);
    ranked.sort_by_key(|(index, _)| *index);
    ranked.into_iter().map(|(_, place)| place).collect()
}

/// Orders places by opening time. Equal opening times keep their input order.
pub fn order_by_opening<'a>(places: &[&'a Place]) -> Vec<&'a Place> {
    let mut ordered = places.to_vec();
    ordered.sort_by_key(|place| place.open_time);
    ordered
}

/// Builds one day's itinerary from the places assigned to it.
///
/// Visits run earliest-opening first. Distances chain from the origin to the first
/// place and then place to place, so the total is not a shortest path.
pub fn build_day_route(
    cluster: usize,
    members: &[&Place],
    origin: &UserLocation,
    max_places: usize,
) -> DayRoute {
    let selected = select_top_rated(members, max_places);
    let ordered = order_by_opening(&selected);

    let Some((first, rest)) = ordered.split_first() else {
        return DayRoute::empty(cluster);
    };

    let from_origin = haversine_km(origin, *first);
    let mut route = DayRoute {
        cluster,
        total_distance: from_origin,
        places: vec![visit(first, from_origin)],
        distances: Vec::with_capacity(rest.len()),
    };

    let mut previous = *first;
    for place in rest {
        let distance = haversine_km(previous, *place);
        route.distances.push(RouteLeg {
            from: previous.place_id.clone(),
            to: place.place_id.clone(),
            distance,
        });
        route.total_distance += distance;
        route.places.push(visit(place, distance));
        previous = *place;
    }

    route
}

/// Builds exactly `num_days` day routes from per-place cluster labels.
///
/// `labels[i]` is the 0-based cluster of `places[i]`. Labels outside `0..num_days`
/// are ignored. Days with no places come back empty.
pub fn build_day_routes(
    places: &[Place],
    labels: &[usize],
    num_days: usize,
    origin: &UserLocation,
    max_places: usize,
) -> Vec<DayRoute> {
    let mut members: Vec<Vec<&Place>> = vec![Vec::new(); num_days];
    for (place, &label) in places.iter().zip(labels) {
        if let Some(group) = members.get_mut(label) {
            group.push(place);
        }
    }

    members
        .iter()
        .enumerate()
        .map(|(index, group)| build_day_route(index + 1, group, origin, max_places))
        .collect()
}

fn visit(place: &Place, distance_from_previous: f64) -> PlaceVisit {
    PlaceVisit {
        place_id: place.place_id.clone(),
        open_time: place.open_time,
        close_time: place.close_time,
        rating: place.rating,
        distance_from_previous,
    }
}
