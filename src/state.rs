use std::sync::Arc;

use crate::clients::Providers;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::db::Store;
use crate::services::{ResourceService, SeaOrmResourceService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all provider clients to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub resource_service: Arc<dyn ResourceService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.providers.request_timeout_seconds)?;
        let providers = Providers::from_config(&config.providers, &http_client);
        Self::with_providers(config, providers).await
    }

    /// Same wiring with caller-supplied upstreams.
    pub async fn with_providers(config: Config, providers: Providers) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let resource_service = Arc::new(SeaOrmResourceService::new(
            store.clone(),
            providers,
            config.cache.clone(),
        )) as Arc<dyn ResourceService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            resource_service,
        })
    }
}
