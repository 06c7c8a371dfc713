use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};

use crate::error::AppResult;

const SQLITE_PRAGMAS: [&str; 2] = ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    if db.get_database_backend() == DbBackend::Sqlite {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(DbBackend::Sqlite, pragma.to_string())).await?;
        }
    }

    Migrator::up(&db, None).await?;
    tracing::debug!(backend = ?db.get_database_backend(), "database ready");
    Ok(db)
}
