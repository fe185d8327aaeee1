use crate::domain::LocationId;
use crate::entities::{locations, prelude::*};
use crate::models::location::{Location, NewLocation};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::info;

/// Geocoded locations. Rows are immutable once written.
pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: locations::Model) -> Location {
        Location {
            id: LocationId::new(m.id),
            search_query: m.search_query,
            formatted_query: m.formatted_query,
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }

    pub async fn find_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    pub async fn exists(&self, id: LocationId) -> Result<bool> {
        let count = Locations::find()
            .filter(locations::Column::Id.eq(id.value()))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    /// Inserts unless another request stored the same `search_query` first;
    /// either way returns the row that ends up in the table.
    pub async fn insert_or_get(&self, location: &NewLocation) -> Result<Location> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        let inserted = Locations::insert(active_model)
            .on_conflict(
                OnConflict::column(locations::Column::SearchQuery)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        if inserted > 0 {
            info!("Stored location '{}'", location.search_query);
        }

        self.find_by_query(&location.search_query)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Location '{}' missing right after insert",
                    location.search_query
                )
            })
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Locations::find().count(&self.conn).await?)
    }
}
