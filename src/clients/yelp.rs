use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{BusinessProvider, endpoint, fetch_json};

const SERVICE: &str = "Yelp";

#[derive(Debug, Deserialize)]
struct BusinessSearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YelpBusiness {
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    /// `$` through `$$$$`; absent for many listings.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: f64,
    pub url: String,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YelpClient {
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
impl BusinessProvider for YelpClient {
    async fn search_businesses(&self, location: &str) -> Result<Vec<YelpBusiness>> {
        let mut url = endpoint(&self.base_url, "v3/businesses/search")?;
        url.query_pairs_mut().append_pair("location", location);

        debug!("Searching businesses in '{}'", location);

        let request = self.client.get(url).bearer_auth(&self.api_key);
        let response: BusinessSearchResponse = fetch_json(request, SERVICE).await?;
        Ok(response.businesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_business_search() {
        let json = r#"{
            "total": 2,
            "businesses": [
                {
                    "id": "a",
                    "name": "Pike Place Chowder",
                    "image_url": "https://s3-media.fl.yelpcdn.com/a.jpg",
                    "price": "$$",
                    "rating": 4.5,
                    "url": "https://www.yelp.com/biz/a"
                },
                {
                    "id": "b",
                    "name": "Corner Cart",
                    "rating": 3.0,
                    "url": "https://www.yelp.com/biz/b"
                }
            ]
        }"#;

        let parsed: BusinessSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.businesses.len(), 2);
        assert_eq!(parsed.businesses[0].price.as_deref(), Some("$$"));
        assert!(parsed.businesses[1].price.is_none());
        assert!(parsed.businesses[1].image_url.is_empty());
    }
}
