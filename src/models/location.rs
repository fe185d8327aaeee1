use serde::{Deserialize, Serialize};

use crate::clients::geocode::GeocodeResult;
use crate::domain::LocationId;

/// A geocoded search. Written once, never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A geocoder answer that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    #[must_use]
    pub fn from_geocode(search_query: &str, result: GeocodeResult) -> Self {
        Self {
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
        }
    }
}
