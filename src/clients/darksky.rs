use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{WeatherProvider, endpoint, fetch_json};
use crate::domain::Coordinates;

const SERVICE: &str = "Dark Sky";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    data: Vec<DarkSkyHour>,
}

/// One entry of the hourly forecast block.
#[derive(Debug, Clone, Deserialize)]
pub struct DarkSkyHour {
    /// Unix seconds.
    pub time: i64,
    #[serde(default)]
    pub summary: String,
}

#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DarkSkyClient {
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
impl WeatherProvider for DarkSkyClient {
    async fn hourly_forecast(&self, at: Coordinates) -> Result<Vec<DarkSkyHour>> {
        let path = format!("forecast/{}/{},{}", self.api_key, at.latitude, at.longitude);
        let url = endpoint(&self.base_url, &path)?;

        debug!("Fetching forecast for {},{}", at.latitude, at.longitude);

        let response: ForecastResponse = fetch_json(self.client.get(url), SERVICE).await?;
        Ok(response.hourly.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_upstream_error_hides_path_key() {
        let client = DarkSkyClient::with_shared_client(
            Client::new(),
            "http://127.0.0.1:1",
            "SECRETSKYKEY",
        );

        let err = client
            .hourly_forecast(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();

        assert!(!format!("{err:#}").contains("SECRETSKYKEY"));
    }

    #[test]
    fn parses_hourly_block() {
        let json = r#"{
            "latitude": 47.6,
            "longitude": -122.3,
            "currently": { "time": 1791993600, "summary": "Clear" },
            "hourly": {
                "summary": "Rain starting tonight.",
                "data": [
                    { "time": 1791993600, "summary": "Partly Cloudy", "temperature": 55.2 },
                    { "time": 1791997200, "summary": "Drizzle" }
                ]
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.hourly.data.len(), 2);
        assert_eq!(parsed.hourly.data[1].summary, "Drizzle");
        assert_eq!(parsed.hourly.data[0].time, 1_791_993_600);
    }
}
