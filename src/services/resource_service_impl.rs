//! `SeaORM` implementation of the `ResourceService` trait.
//!
//! Each resource call is one [`lookup_or_fetch`] over that resource's
//! repository, the matching provider client and its normalizer.

use tracing::{debug, info};

use crate::clients::Providers;
use crate::config::CacheConfig;
use crate::db::Store;
use crate::domain::{Coordinates, LocationId, ResourceKind};
use crate::models::event::Event;
use crate::models::location::{Location, NewLocation};
use crate::models::movie::Movie;
use crate::models::weather::Weather;
use crate::models::yelp::Yelp;
use crate::services::gateway::{LookupKey, lookup_or_fetch};
use crate::services::resource_service::{ResourceError, ResourceService};

pub struct SeaOrmResourceService {
    store: Store,
    providers: Providers,
    cache: CacheConfig,
}

impl SeaOrmResourceService {
    #[must_use]
    pub const fn new(store: Store, providers: Providers, cache: CacheConfig) -> Self {
        Self {
            store,
            providers,
            cache,
        }
    }

    /// Resource rows reference their location, so unknown ids are rejected
    /// before anything reaches a provider.
    async fn ensure_location(&self, location_id: LocationId) -> Result<(), ResourceError> {
        let exists = self
            .store
            .locations()
            .exists(location_id)
            .await
            .map_err(ResourceError::database)?;

        if exists {
            Ok(())
        } else {
            Err(ResourceError::LocationNotFound(format!("id {location_id}")))
        }
    }

    fn key(&self, kind: ResourceKind, location_id: LocationId) -> LookupKey {
        LookupKey {
            kind,
            location_id,
            ttl: self.cache.ttl(kind),
        }
    }
}

#[async_trait::async_trait]
impl ResourceService for SeaOrmResourceService {
    async fn resolve_location(&self, search_query: &str) -> Result<Location, ResourceError> {
        let locations = self.store.locations();

        if let Some(location) = locations
            .find_by_query(search_query)
            .await
            .map_err(ResourceError::database)?
        {
            debug!("Location '{}' served from store", search_query);
            return Ok(location);
        }

        let result = self
            .providers
            .geocoder
            .geocode(search_query)
            .await
            .map_err(|e| ResourceError::external("Google Geocoding", &e))?
            .ok_or_else(|| ResourceError::LocationNotFound(search_query.to_string()))?;

        let location = locations
            .insert_or_get(&NewLocation::from_geocode(search_query, result))
            .await
            .map_err(ResourceError::database)?;

        info!(
            "Geocoded '{}' -> {} ({}, {})",
            search_query, location.formatted_query, location.latitude, location.longitude
        );

        Ok(location)
    }

    async fn weather(
        &self,
        location_id: LocationId,
        at: Coordinates,
    ) -> Result<Vec<Weather>, ResourceError> {
        self.ensure_location(location_id).await?;

        let lookup = lookup_or_fetch(
            &self.store.weather(),
            self.key(ResourceKind::Weather, location_id),
            || self.providers.weather.hourly_forecast(at),
            Weather::from_forecast,
        )
        .await?;

        Ok(lookup.records)
    }

    async fn events(
        &self,
        location_id: LocationId,
        at: Coordinates,
    ) -> Result<Vec<Event>, ResourceError> {
        self.ensure_location(location_id).await?;

        let lookup = lookup_or_fetch(
            &self.store.events(),
            self.key(ResourceKind::Events, location_id),
            || self.providers.events.events_near(at),
            Event::from_eventbrite,
        )
        .await?;

        Ok(lookup.records)
    }

    async fn yelps(
        &self,
        location_id: LocationId,
        search_query: &str,
    ) -> Result<Vec<Yelp>, ResourceError> {
        self.ensure_location(location_id).await?;

        let lookup = lookup_or_fetch(
            &self.store.yelps(),
            self.key(ResourceKind::Yelps, location_id),
            || self.providers.businesses.search_businesses(search_query),
            Yelp::from_business,
        )
        .await?;

        Ok(lookup.records)
    }

    async fn movies(
        &self,
        location_id: LocationId,
        search_query: &str,
    ) -> Result<Vec<Movie>, ResourceError> {
        self.ensure_location(location_id).await?;

        let lookup = lookup_or_fetch(
            &self.store.movies(),
            self.key(ResourceKind::Movies, location_id),
            || self.providers.movies.search_movies(search_query),
            Movie::from_tmdb,
        )
        .await?;

        Ok(lookup.records)
    }
}
