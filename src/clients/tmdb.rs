use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{MovieProvider, endpoint, fetch_json};

const SERVICE: &str = "TMDB";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
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
impl MovieProvider for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<TmdbMovie>> {
        let mut url = endpoint(&self.base_url, "3/search/movie")?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("language", "en-US")
            .append_pair("page", "1")
            .append_pair("query", query);

        debug!("Searching movies for '{}'", query);

        let response: SearchResponse = fetch_json(self.client.get(url), SERVICE).await?;
        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movie_search() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "id": 858,
                    "title": "Sleepless in Seattle",
                    "overview": "A recently widowed man...",
                    "vote_average": 6.7,
                    "vote_count": 1805,
                    "poster_path": "/afkYP15OeUOD0tFEmj6VvejuOcz.jpg",
                    "popularity": 12.4,
                    "release_date": "1993-06-24"
                },
                { "title": "Untitled", "poster_path": null }
            ],
            "total_results": 2
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].vote_count, 1805);
        assert_eq!(parsed.results[0].release_date.as_deref(), Some("1993-06-24"));
        assert!(parsed.results[1].poster_path.is_none());
        assert_eq!(parsed.results[1].vote_count, 0);
    }
}
