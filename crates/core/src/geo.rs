/// Mean Earth radius in kilometers used by `haversine_km`.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything that sits at a latitude/longitude in degrees.
pub trait Coordinate {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn latitude(&self) -> f64 {
        self.0
    }

    fn longitude(&self) -> f64 {
        self.1
    }
}

/// Great-circle distance in kilometers between two points, using the haversine formula.
pub fn haversine_km<A, B>(from: &A, to: &B) -> f64
where
    A: Coordinate + ?Sized,
    B: Coordinate + ?Sized,
{
    haversine::distance(location(from), location(to), haversine::Units::Kilometers)
}

fn location<C: Coordinate + ?Sized>(point: &C) -> haversine::Location {
    haversine::Location {
        latitude: point.latitude(),
        longitude: point.longitude(),
    }
}
