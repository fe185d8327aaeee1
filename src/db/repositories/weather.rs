use crate::domain::LocationId;
use crate::entities::{prelude::*, weather};
use crate::models::weather::Weather as WeatherRecord;
use crate::services::gateway::RecordStore;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct WeatherRepository {
    conn: DatabaseConnection,
}

impl WeatherRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: weather::Model) -> WeatherRecord {
        WeatherRecord {
            forecast: m.forecast,
            time: m.time,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn to_active_model(record: &WeatherRecord) -> weather::ActiveModel {
        weather::ActiveModel {
            forecast: Set(record.forecast.clone()),
            time: Set(record.time.clone()),
            created_at: Set(record.created_at),
            location_id: Set(record.location_id.value()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecordStore<WeatherRecord> for WeatherRepository {
    async fn find_for_location(&self, location_id: LocationId) -> Result<Vec<WeatherRecord>> {
        let rows = Weather::find()
            .filter(weather::Column::LocationId.eq(location_id.value()))
            .order_by_asc(weather::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    async fn delete_for_location(&self, location_id: LocationId) -> Result<u64> {
        let res = Weather::delete_many()
            .filter(weather::Column::LocationId.eq(location_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }

    async fn insert_batch(&self, records: &[WeatherRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        Weather::insert_many(records.iter().map(Self::to_active_model))
            .exec(&self.conn)
            .await?;

        Ok(())
    }
}
