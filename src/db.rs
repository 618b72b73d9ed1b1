use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migration::Migrator;

pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let mut opt = ConnectOptions::new(database_url.to_string());
    if in_memory {
        // Each pooled connection would otherwise open its own empty database.
        opt.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opt).await?;

    if !in_memory {
        pragma(&db, "PRAGMA journal_mode=WAL").await?;
        pragma(&db, "PRAGMA synchronous=NORMAL").await?;
    }

    Migrator::up(&db, None).await?;
    info!(in_memory, "database ready");
    Ok(db)
}

async fn pragma(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_string())).await?;
    Ok(())
}
