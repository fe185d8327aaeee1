use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{cache::DEFAULT_TTL_SECONDS, env};
use crate::domain::{ResourceKind, Ttl};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub cache: CacheConfig,

    pub providers: ProvidersConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// SQLite URL, e.g. `sqlite:data/geoscout.db` or `sqlite::memory:`
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/geoscout.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Per-resource cache lifetimes. Locations are never refreshed and have no entry here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub weather_ttl_seconds: u64,

    pub events_ttl_seconds: u64,

    pub yelps_ttl_seconds: u64,

    pub movies_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            weather_ttl_seconds: DEFAULT_TTL_SECONDS,
            events_ttl_seconds: DEFAULT_TTL_SECONDS,
            yelps_ttl_seconds: DEFAULT_TTL_SECONDS,
            movies_ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self, kind: ResourceKind) -> Ttl {
        let secs = match kind {
            ResourceKind::Weather => self.weather_ttl_seconds,
            ResourceKind::Events => self.events_ttl_seconds,
            ResourceKind::Yelps => self.yelps_ttl_seconds,
            ResourceKind::Movies => self.movies_ttl_seconds,
        };
        Ttl::from_secs(secs)
    }

    fn set_all(&mut self, secs: u64) {
        self.weather_ttl_seconds = secs;
        self.events_ttl_seconds = secs;
        self.yelps_ttl_seconds = secs;
        self.movies_ttl_seconds = secs;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,

    pub geocode_base_url: String,

    pub geocode_api_key: String,

    pub weather_base_url: String,

    pub weather_api_key: String,

    pub events_base_url: String,

    pub events_api_key: String,

    pub yelp_base_url: String,

    pub yelp_api_key: String,

    pub movies_base_url: String,

    pub movies_api_key: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            geocode_base_url: "https://maps.googleapis.com".to_string(),
            geocode_api_key: String::new(),
            weather_base_url: "https://api.darksky.net".to_string(),
            weather_api_key: String::new(),
            events_base_url: "https://www.eventbriteapi.com".to_string(),
            events_api_key: String::new(),
            yelp_base_url: "https://api.yelp.com".to_string(),
            yelp_api_key: String::new(),
            movies_base_url: "https://api.themoviedb.org".to_string(),
            movies_api_key: String::new(),
        }
    }
}

impl ProvidersConfig {
    fn base_urls(&self) -> [(&'static str, &str); 5] {
        [
            ("geocode", self.geocode_base_url.as_str()),
            ("weather", self.weather_base_url.as_str()),
            ("events", self.events_base_url.as_str()),
            ("yelp", self.yelp_base_url.as_str()),
            ("movies", self.movies_base_url.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Loads the first config file found, then layers `.env` and the process
    /// environment on top.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;

        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from: {}", path.display());
        }
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies the environment variables the deployment sets (`PORT`, API keys, ...).
    /// `lookup` abstracts the environment so callers can supply their own.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(env::DATABASE_URL) {
            self.general.database_path = url;
        }

        if let Some(port) = get(env::PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{} must be a port number, got '{port}'", env::PORT))?;
        }

        if let Some(ttl) = get(env::CACHE_TTL_SECONDS) {
            let secs = ttl.trim().parse().with_context(|| {
                format!("{} must be whole seconds, got '{ttl}'", env::CACHE_TTL_SECONDS)
            })?;
            self.cache.set_all(secs);
        }

        let keys = [
            (env::GEOCODE_API_KEY, &mut self.providers.geocode_api_key),
            (env::WEATHER_API_KEY, &mut self.providers.weather_api_key),
            (env::EVENTBRITE_API_KEY, &mut self.providers.events_api_key),
            (env::YELP_API_KEY, &mut self.providers.yelp_api_key),
            (env::MOVIE_API_KEY, &mut self.providers.movies_api_key),
        ];
        for (var, slot) in keys {
            if let Some(value) = get(var) {
                *slot = value;
            }
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("geoscout").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".geoscout").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.general.database_path.starts_with("sqlite:") {
            anyhow::bail!(
                "Only SQLite databases are supported, got '{}'",
                self.general.database_path
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        for (name, url) in self.providers.base_urls() {
            if url.trim().is_empty() {
                anyhow::bail!("Base URL for the {name} provider cannot be empty");
            }
        }

        if self.providers.geocode_api_key.is_empty() {
            warn!("No geocoding API key configured; /location lookups will fail upstream");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cache.weather_ttl_seconds, 15);
        assert_eq!(config.cache.ttl(ResourceKind::Movies), Ttl::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[cache]"));
        assert!(toml_str.contains("[providers]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [cache]
            events_ttl_seconds = 900
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.cache.ttl(ResourceKind::Events), Ttl::from_secs(900));
        assert_eq!(config.cache.ttl(ResourceKind::Weather), Ttl::from_secs(15));
        assert_eq!(config.providers.yelp_base_url, "https://api.yelp.com");
    }

    #[test]
    fn env_overrides_port_keys_and_ttl() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env_from(&[
                ("PORT", "8080"),
                ("GEOCODEAPI_KEY", "geo-key"),
                ("YELP_API_KEY", "yelp-key"),
                ("CACHE_TTL_SECONDS", "3600"),
                ("MOVIE_API_KEY", "   "),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.providers.geocode_api_key, "geo-key");
        assert_eq!(config.providers.yelp_api_key, "yelp-key");
        assert!(config.providers.movies_api_key.is_empty());
        for kind in ResourceKind::all() {
            assert_eq!(config.cache.ttl(*kind), Ttl::from_secs(3600));
        }
    }

    #[test]
    fn env_override_rejects_bad_port() {
        let mut config = Config::default();
        let err = config
            .apply_env_overrides(env_from(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn validate_rejects_non_sqlite_database() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env_from(&[("DATABASE_URL", "postgres://localhost/city")]))
            .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.providers.movies_base_url = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("movies"));
    }
}
