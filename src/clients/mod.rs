//! Upstream provider clients.
//!
//! Each client owns one third-party API and returns that API's records
//! untouched. Normalizing them into stored rows happens in [`crate::models`].
//! Services hold the clients behind the traits below so tests can swap in
//! doubles that never touch the network.

pub mod darksky;
pub mod eventbrite;
pub mod geocode;
pub mod tmdb;
pub mod yelp;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::ProvidersConfig;
use crate::domain::Coordinates;

use darksky::{DarkSkyClient, DarkSkyHour};
use eventbrite::{EventbriteClient, EventbriteEvent};
use geocode::{GeocodeClient, GeocodeResult};
use tmdb::{TmdbClient, TmdbMovie};
use yelp::{YelpBusiness, YelpClient};

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Best match for a free-form address, or `None` when the geocoder has nothing.
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn hourly_forecast(&self, at: Coordinates) -> Result<Vec<DarkSkyHour>>;
}

#[async_trait]
pub trait EventsProvider: Send + Sync {
    async fn events_near(&self, at: Coordinates) -> Result<Vec<EventbriteEvent>>;
}

#[async_trait]
pub trait BusinessProvider: Send + Sync {
    async fn search_businesses(&self, location: &str) -> Result<Vec<YelpBusiness>>;
}

#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<Vec<TmdbMovie>>;
}

/// The full set of upstreams the gateway fans out to.
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn GeocodeProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub events: Arc<dyn EventsProvider>,
    pub businesses: Arc<dyn BusinessProvider>,
    pub movies: Arc<dyn MovieProvider>,
}

impl Providers {
    /// Real HTTP clients sharing one connection pool.
    #[must_use]
    pub fn from_config(config: &ProvidersConfig, http: &reqwest::Client) -> Self {
        Self {
            geocoder: Arc::new(GeocodeClient::with_shared_client(
                http.clone(),
                &config.geocode_base_url,
                &config.geocode_api_key,
            )),
            weather: Arc::new(DarkSkyClient::with_shared_client(
                http.clone(),
                &config.weather_base_url,
                &config.weather_api_key,
            )),
            events: Arc::new(EventbriteClient::with_shared_client(
                http.clone(),
                &config.events_base_url,
                &config.events_api_key,
            )),
            businesses: Arc::new(YelpClient::with_shared_client(
                http.clone(),
                &config.yelp_base_url,
                &config.yelp_api_key,
            )),
            movies: Arc::new(TmdbClient::with_shared_client(
                http.clone(),
                &config.movies_base_url,
                &config.movies_api_key,
            )),
        }
    }
}

/// Sends a request and decodes its JSON body, turning non-2xx statuses into errors.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    service: &str,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("Failed to send request to {service}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("Failed to read {service} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{service} request failed with status {status}: {}",
            truncate_body(&body)
        ));
    }

    serde_json::from_str(&body).with_context(|| format!("Failed to parse {service} JSON"))
}

/// Joins a configured base URL and a path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<url::Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url::Url::parse(&joined).with_context(|| format!("Invalid provider URL: {joined}"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    }
}
