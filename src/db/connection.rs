// SQLite connection pool. The database file is created on first use.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Pool, Sqlite};
use tracing::info;

use crate::db::migration;

pub async fn establish_connection(database_url: &str) -> Result<Pool<Sqlite>, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");

    // Create database if it doesn't exist
    if !in_memory && !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url).await?;
    }

    // Every connection to an in-memory database is a separate database,
    // so keep exactly one and never recycle it
    let options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };
    let pool = options.connect(database_url).await?;

    if !in_memory {
        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
    }

    migration::run_migrations(&pool).await?;

    Ok(pool)
}
