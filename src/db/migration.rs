use sqlx::SqlitePool;
use tracing::info;

use crate::db::INIT_SCHEMA;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    // sqlx runs a multi-statement string as one batch on sqlite
    sqlx::raw_sql(INIT_SCHEMA).execute(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}
