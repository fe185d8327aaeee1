use crate::domain::LocationId;
use crate::entities::{events, prelude::*};
use crate::models::event::Event;
use crate::services::gateway::RecordStore;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: events::Model) -> Event {
        Event {
            link: m.link,
            name: m.name,
            date: m.date,
            summary: m.summary,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn to_active_model(record: &Event) -> events::ActiveModel {
        events::ActiveModel {
            link: Set(record.link.clone()),
            name: Set(record.name.clone()),
            date: Set(record.date.clone()),
            summary: Set(record.summary.clone()),
            created_at: Set(record.created_at),
            location_id: Set(record.location_id.value()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecordStore<Event> for EventRepository {
    async fn find_for_location(&self, location_id: LocationId) -> Result<Vec<Event>> {
        let rows = Events::find()
            .filter(events::Column::LocationId.eq(location_id.value()))
            .order_by_asc(events::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    async fn delete_for_location(&self, location_id: LocationId) -> Result<u64> {
        let res = Events::delete_many()
            .filter(events::Column::LocationId.eq(location_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }

    async fn insert_batch(&self, records: &[Event]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        Events::insert_many(records.iter().map(Self::to_active_model))
            .exec(&self.conn)
            .await?;

        Ok(())
    }
}
