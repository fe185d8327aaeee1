use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{EventsProvider, endpoint, fetch_json};
use crate::constants::EVENT_SEARCH_RADIUS;
use crate::domain::Coordinates;

const SERVICE: &str = "Eventbrite";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    events: Vec<EventbriteEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventbriteEvent {
    pub url: String,
    pub name: MultipartText,
    pub start: EventTime,
    #[serde(default)]
    pub description: MultipartText,
}

/// Eventbrite wraps every rich text field as `{ "text": ..., "html": ... }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MultipartText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventTime {
    /// Venue-local wall clock, e.g. `2026-10-14T19:00:00`.
    pub local: String,
}

#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    base_url: String,
    token: String,
}

impl EventbriteClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, token: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl EventsProvider for EventbriteClient {
    async fn events_near(&self, at: Coordinates) -> Result<Vec<EventbriteEvent>> {
        let mut url = endpoint(&self.base_url, "v3/events/search/")?;
        url.query_pairs_mut()
            .append_pair("token", &self.token)
            .append_pair("location.latitude", &at.latitude.to_string())
            .append_pair("location.longitude", &at.longitude.to_string())
            .append_pair("location.within", EVENT_SEARCH_RADIUS);

        debug!("Searching events near {},{}", at.latitude, at.longitude);

        let response: SearchResponse = fetch_json(self.client.get(url), SERVICE).await?;
        Ok(response.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_search() {
        let json = r#"{
            "pagination": { "object_count": 2 },
            "events": [
                {
                    "url": "https://www.eventbrite.com/e/1",
                    "name": { "text": "Harvest Fair", "html": "Harvest Fair" },
                    "start": { "local": "2026-10-17T10:00:00", "utc": "2026-10-17T17:00:00Z" },
                    "description": { "text": "Pumpkins.", "html": "<p>Pumpkins.</p>" }
                },
                {
                    "url": "https://www.eventbrite.com/e/2",
                    "name": { "text": "Night Market" },
                    "start": { "local": "2026-10-18T18:30:00" },
                    "description": { "text": null }
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.events[0].name.text.as_deref(), Some("Harvest Fair"));
        assert!(parsed.events[1].description.text.is_none());
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let json = r#"{
            "url": "u",
            "name": { "text": "n" },
            "start": { "local": "2026-10-17T10:00:00" }
        }"#;
        let event: EventbriteEvent = serde_json::from_str(json).unwrap();
        assert!(event.description.text.is_none());
    }
}
