//! Domain service for location resolution and the cached resources.
//!
//! Handlers talk to this trait only; the store and the provider clients stay
//! behind it.

use crate::domain::{Coordinates, LocationId};
use crate::models::event::Event;
use crate::models::location::Location;
use crate::models::movie::Movie;
use crate::models::weather::Weather;
use crate::models::yelp::Yelp;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External API error: {service} - {message}")]
    ExternalApi { service: String, message: String },
}

impl ResourceError {
    #[must_use]
    pub fn database(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }

    #[must_use]
    pub fn external(service: &str, err: &anyhow::Error) -> Self {
        Self::ExternalApi {
            service: service.to_string(),
            message: format!("{err:#}"),
        }
    }
}

#[async_trait::async_trait]
pub trait ResourceService: Send + Sync {
    /// Returns the stored location for `search_query`, geocoding it the first
    /// time it is seen. Stored locations are never refreshed.
    ///
    /// # Errors
    ///
    /// - Returns [`ResourceError::LocationNotFound`] if the geocoder has no match
    /// - Returns [`ResourceError::ExternalApi`] if the geocoder call fails
    async fn resolve_location(&self, search_query: &str) -> Result<Location, ResourceError>;

    /// Hourly forecast entries for a stored location.
    ///
    /// # Errors
    ///
    /// - Returns [`ResourceError::LocationNotFound`] for an unknown location id
    /// - Returns [`ResourceError::ExternalApi`] if the weather provider fails
    async fn weather(
        &self,
        location_id: LocationId,
        at: Coordinates,
    ) -> Result<Vec<Weather>, ResourceError>;

    /// Events within the search radius of a stored location.
    async fn events(
        &self,
        location_id: LocationId,
        at: Coordinates,
    ) -> Result<Vec<Event>, ResourceError>;

    /// Businesses for a stored location, searched by its query text.
    async fn yelps(
        &self,
        location_id: LocationId,
        search_query: &str,
    ) -> Result<Vec<Yelp>, ResourceError>;

    /// Movies matching a stored location's query text.
    async fn movies(
        &self,
        location_id: LocationId,
        search_query: &str,
    ) -> Result<Vec<Movie>, ResourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_display() {
        let err = ResourceError::LocationNotFound("atlantis".to_string());
        assert_eq!(err.to_string(), "Location not found: atlantis");

        let err = ResourceError::external("Yelp", &anyhow::anyhow!("timed out"));
        assert_eq!(err.to_string(), "External API error: Yelp - timed out");
    }

    #[test]
    fn database_error_keeps_context_chain() {
        let err = anyhow::anyhow!("disk I/O error").context("insert weather");
        let err = ResourceError::database(err);
        assert_eq!(err.to_string(), "Database error: insert weather: disk I/O error");
    }
}
