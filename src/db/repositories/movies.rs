use crate::domain::LocationId;
use crate::entities::{movies, prelude::*};
use crate::models::movie::Movie;
use crate::services::gateway::RecordStore;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: movies::Model) -> Movie {
        Movie {
            title: m.title,
            overview: m.overview,
            average_votes: m.average_votes,
            total_votes: m.total_votes,
            image_url: m.image_url,
            popularity: m.popularity,
            released_on: m.released_on,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn to_active_model(record: &Movie) -> movies::ActiveModel {
        movies::ActiveModel {
            title: Set(record.title.clone()),
            overview: Set(record.overview.clone()),
            average_votes: Set(record.average_votes),
            total_votes: Set(record.total_votes),
            image_url: Set(record.image_url.clone()),
            popularity: Set(record.popularity),
            released_on: Set(record.released_on.clone()),
            created_at: Set(record.created_at),
            location_id: Set(record.location_id.value()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecordStore<Movie> for MovieRepository {
    async fn find_for_location(&self, location_id: LocationId) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .filter(movies::Column::LocationId.eq(location_id.value()))
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    async fn delete_for_location(&self, location_id: LocationId) -> Result<u64> {
        let res = Movies::delete_many()
            .filter(movies::Column::LocationId.eq(location_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }

    async fn insert_batch(&self, records: &[Movie]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        Movies::insert_many(records.iter().map(Self::to_active_model))
            .exec(&self.conn)
            .await?;

        Ok(())
    }
}
