use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{GeocodeProvider, endpoint, fetch_json};

const SERVICE: &str = "Google Geocoding";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl GeocodeProvider for GeocodeClient {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>> {
        let mut url = endpoint(&self.base_url, "maps/api/geocode/json")?;
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", &self.api_key);

        debug!("Geocoding '{}'", query);

        let response: GeocodeResponse = fetch_json(self.client.get(url), SERVICE).await?;

        // ZERO_RESULTS is a clean miss; anything else without results is an upstream fault.
        if response.results.is_empty()
            && !response.status.is_empty()
            && response.status != "OK"
            && response.status != "ZERO_RESULTS"
        {
            anyhow::bail!("{SERVICE} returned status {}", response.status);
        }

        Ok(response.results.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_google_geocode_payload() {
        let json = r#"{
            "results": [{
                "formatted_address": "Seattle, WA, USA",
                "geometry": { "location": { "lat": 47.6062095, "lng": -122.3320708 } },
                "place_id": "ChIJVTPokywQkFQRmtVEaUZlJRA"
            }],
            "status": "OK"
        }"#;

        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        let first = &parsed.results[0];
        assert_eq!(first.formatted_address, "Seattle, WA, USA");
        assert!((first.geometry.location.lat - 47.606_209_5).abs() < 1e-9);
        assert!((first.geometry.location.lng + 122.332_070_8).abs() < 1e-9);
    }

    #[test]
    fn parses_zero_results() {
        let parsed: GeocodeResponse =
            serde_json::from_str(r#"{"results": [], "status": "ZERO_RESULTS"}"#).unwrap();
        assert!(parsed.results.is_empty());
        assert_eq!(parsed.status, "ZERO_RESULTS");
    }
}
