// Alert persistence. The UNIQUE constraint on tx_hash is the only thing
// that decides whether an alert is new.

use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use crate::models::{ClassifiedAlert, PersistedAlert};

/// Insert the alert unless its hash is already stored.
/// Returns `true` when a row was written.
pub async fn insert_alert(pool: &Pool<Sqlite>, alert: &ClassifiedAlert) -> Result<bool, sqlx::Error> {
    let tx = &alert.transaction;

    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO alerts
        (sender, tx_hash, receiver, value, timestamp, labels)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&tx.sender)
    .bind(&tx.hash)
    .bind(&tx.receiver)
    .bind(tx.value)
    .bind(tx.timestamp)
    .bind(alert.labels_joined())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn alert_exists(pool: &Pool<Sqlite>, tx_hash: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM alerts WHERE tx_hash = ?")
        .bind(tx_hash)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn count_alerts(pool: &Pool<Sqlite>) -> Result<i64, sqlx::Error> {
    let count = sqlx::query("SELECT COUNT(*) FROM alerts")
        .fetch_one(pool)
        .await?
        .get::<i64, _>(0);

    Ok(count)
}

/// Newest first, paginated. Returns the page and the total row count.
pub async fn get_alerts(
    pool: &Pool<Sqlite>,
    offset: i64,
    limit: i64,
) -> Result<(Vec<PersistedAlert>, i64), sqlx::Error> {
    let total_count = count_alerts(pool).await?;

    let rows = sqlx::query(
        r#"SELECT id, sender, tx_hash, receiver, value, timestamp, labels
           FROM alerts
           ORDER BY timestamp DESC, id DESC
           LIMIT ? OFFSET ?"#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows.iter().map(row_to_alert).collect(), total_count))
}

/// Every stored alert in insertion order.
pub async fn get_all_alerts(pool: &Pool<Sqlite>) -> Result<Vec<PersistedAlert>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, sender, tx_hash, receiver, value, timestamp, labels FROM alerts ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_alert).collect())
}

fn row_to_alert(row: &SqliteRow) -> PersistedAlert {
    PersistedAlert {
        id: row.get("id"),
        sender: row.get("sender"),
        tx_hash: row.get("tx_hash"),
        receiver: row.get("receiver"),
        value: row.get("value"),
        timestamp: row.get("timestamp"),
        labels: row.get("labels"),
    }
}
