use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Wall-clock time of day used for opening and closing hours.
///
/// Accepts `HH:MM` or `HH:MM:SS` on input and orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(Self)
            .map_err(|_| format!("invalid time of day '{value}', expected HH:MM or HH:MM:SS"))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{}", self.0.format("%H:%M"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate for UserLocation {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
}

impl Coordinate for Place {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub num_days: usize,
    #[serde(alias = "user_location")]
    pub lokasi_user: UserLocation,
    pub places: Vec<Place>,
    /// Overrides the configured clustering seed for this request only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceVisit {
    pub place_id: String,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
    pub rating: f64,
    pub distance_from_previous: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRoute {
    /// 1-based day index.
    pub cluster: usize,
    pub total_distance: f64,
    pub places: Vec<PlaceVisit>,
    pub distances: Vec<RouteLeg>,
}

impl DayRoute {
    pub fn empty(cluster: usize) -> Self {
        Self {
            cluster,
            total_distance: 0.0,
            places: Vec::new(),
            distances: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<DayRoute>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_accepts_short_and_long_forms() {
        let short: TimeOfDay = "08:30".parse().unwrap();
        let long: TimeOfDay = "08:30:00".parse().unwrap();
        assert_eq!(short, long);
        assert_eq!(short.to_string(), "08:30");

        let with_seconds: TimeOfDay = "08:30:15".parse().unwrap();
        assert_eq!(with_seconds.to_string(), "08:30:15");
        assert!(short < with_seconds);
    }

    #[test]
    fn time_of_day_rejects_garbage() {
        assert!("8am".parse::<TimeOfDay>().is_err());
        assert!("25:00".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn request_accepts_lokasi_user_payload() {
        let raw = serde_json::json!({
            "num_days": 1,
            "lokasi_user": { "latitude": -6.2, "longitude": 106.8 },
            "places": [{
                "place_id": "monas",
                "latitude": -6.1754,
                "longitude": 106.8272,
                "rating": 4.7,
                "open_time": "08:00",
                "close_time": "16:00"
            }]
        });

        let request: RouteRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.num_days, 1);
        assert_eq!(request.places[0].open_time, TimeOfDay::from_hm(8, 0).unwrap());
        assert!(request.seed.is_none());
    }

    #[test]
    fn request_accepts_user_location_alias() {
        let raw = serde_json::json!({
            "num_days": 1,
            "user_location": { "latitude": 1.0, "longitude": 2.0 },
            "places": [],
            "seed": 7
        });

        let request: RouteRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.lokasi_user.longitude, 2.0);
        assert_eq!(request.seed, Some(7));
    }
}
