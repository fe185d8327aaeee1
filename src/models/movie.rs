use serde::{Deserialize, Serialize};

use super::Timestamped;
use crate::clients::tmdb::TmdbMovie;
use crate::domain::LocationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: i64,
    pub image_url: Option<String>,
    pub popularity: f64,
    pub released_on: Option<String>,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl Movie {
    #[must_use]
    pub fn from_tmdb(movie: TmdbMovie, location_id: LocationId, created_at: i64) -> Self {
        Self {
            title: movie.title,
            overview: movie.overview,
            average_votes: movie.vote_average,
            total_votes: movie.vote_count,
            image_url: movie.poster_path,
            popularity: movie.popularity,
            released_on: movie.release_date,
            created_at,
            location_id,
        }
    }
}

impl Timestamped for Movie {
    fn created_at(&self) -> i64 {
        self.created_at
    }
}
