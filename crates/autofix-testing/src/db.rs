use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use autofix_workshop_migration::Migrator;

/// Fresh in-memory SQLite database with all migrations applied.
///
/// The pool is capped at one connection: `sqlite::memory:` gives every
/// connection its own database, so a larger pool would scatter the tables.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}
