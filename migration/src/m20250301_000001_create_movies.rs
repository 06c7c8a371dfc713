use sea_orm_migration::{prelude::*, schema::*};
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite gives DECIMAL columns NUMERIC affinity, which turns whole
        // amounts into INTEGER values; sea-orm reads SQLite decimals as REAL.
        // SQLite only auto-increments a plain `integer primary key`.
        let (id, budget) = match manager.get_database_backend() {
            DatabaseBackend::Sqlite => {
                (pk_auto(Movies::Id), double(Movies::Budget).default(0.0).to_owned())
            }
            _ => (
                ColumnDef::new(Movies::Id)
                    .unsigned()
                    .not_null()
                    .auto_increment()
                    .primary_key()
                    .to_owned(),
                decimal_len(Movies::Budget, 15, 2).default(0).to_owned(),
            ),
        };

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(id)
                    .col(string_len(Movies::Title, 255))
                    .col(string_len(Movies::Type, 20))
                    .col(string_len(Movies::Director, 255))
                    .col(budget)
                    .col(string_len(Movies::Location, 255))
                    .col(string_len(Movies::Duration, 100))
                    .col(string_len(Movies::Year, 50))
                    .col(big_integer(Movies::CreatedAt))
                    .col(big_integer(Movies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_created_at")
                    .table(Movies::Table)
                    .col(Movies::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    #[sea_orm(iden = "Movies")]
    Table,
    Id,
    Title,
    Type,
    Director,
    Budget,
    Location,
    Duration,
    Year,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}
