pub const USER_AGENT: &str = concat!("geoscout/", env!("CARGO_PKG_VERSION"));

pub const EVENT_SEARCH_RADIUS: &str = "10km";

pub mod cache {

    /// Upstream keeps this suspiciously short; it stays the default but is configurable.
    pub const DEFAULT_TTL_SECONDS: u64 = 15;
}

pub mod env {

    pub const DATABASE_URL: &str = "DATABASE_URL";

    pub const PORT: &str = "PORT";

    pub const CACHE_TTL_SECONDS: &str = "CACHE_TTL_SECONDS";

    pub const GEOCODE_API_KEY: &str = "GEOCODEAPI_KEY";

    pub const WEATHER_API_KEY: &str = "WEATHER_API_KEY";

    pub const EVENTBRITE_API_KEY: &str = "EVENTBRITE_API_KEY";

    pub const YELP_API_KEY: &str = "YELP_API_KEY";

    pub const MOVIE_API_KEY: &str = "MOVIE_API_KEY";
}
