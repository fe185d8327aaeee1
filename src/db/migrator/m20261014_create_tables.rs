use crate::entities::{events, movies, prelude::*, weather, yelps};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Locations)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Weather)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Events)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Yelps)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Movies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Every cache read filters on location_id.
        manager
            .create_index(
                Index::create()
                    .name("idx_weather_location_id")
                    .table(Weather)
                    .col(weather::Column::LocationId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_location_id")
                    .table(Events)
                    .col(events::Column::LocationId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_yelps_location_id")
                    .table(Yelps)
                    .col(yelps::Column::LocationId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_location_id")
                    .table(Movies)
                    .col(movies::Column::LocationId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Yelps).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Weather).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations).if_exists().to_owned())
            .await
    }
}
