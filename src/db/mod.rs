use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::events::EventRepository;
pub use repositories::location::LocationRepository;
pub use repositories::movies::MovieRepository;
pub use repositories::weather::WeatherRepository;
pub use repositories::yelps::YelpRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & tables ready (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn locations(&self) -> LocationRepository {
        LocationRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn weather(&self) -> WeatherRepository {
        WeatherRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn events(&self) -> EventRepository {
        EventRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn yelps(&self) -> YelpRepository {
        YelpRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn movies(&self) -> MovieRepository {
        MovieRepository::new(self.conn.clone())
    }
}
