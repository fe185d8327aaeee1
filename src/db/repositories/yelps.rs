use crate::domain::LocationId;
use crate::entities::{prelude::*, yelps};
use crate::models::yelp::Yelp;
use crate::services::gateway::RecordStore;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct YelpRepository {
    conn: DatabaseConnection,
}

impl YelpRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: yelps::Model) -> Yelp {
        Yelp {
            name: m.name,
            image_url: m.image_url,
            price: m.price,
            rating: m.rating,
            url: m.url,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn to_active_model(record: &Yelp) -> yelps::ActiveModel {
        yelps::ActiveModel {
            name: Set(record.name.clone()),
            image_url: Set(record.image_url.clone()),
            price: Set(record.price.clone()),
            rating: Set(record.rating),
            url: Set(record.url.clone()),
            created_at: Set(record.created_at),
            location_id: Set(record.location_id.value()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecordStore<Yelp> for YelpRepository {
    async fn find_for_location(&self, location_id: LocationId) -> Result<Vec<Yelp>> {
        let rows = Yelps::find()
            .filter(yelps::Column::LocationId.eq(location_id.value()))
            .order_by_asc(yelps::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    async fn delete_for_location(&self, location_id: LocationId) -> Result<u64> {
        let res = Yelps::delete_many()
            .filter(yelps::Column::LocationId.eq(location_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }

    async fn insert_batch(&self, records: &[Yelp]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        Yelps::insert_many(records.iter().map(Self::to_active_model))
            .exec(&self.conn)
            .await?;

        Ok(())
    }
}
