//! Human-readable dump of every persisted alert.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::db::alert;
use crate::models::PersistedAlert;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub fn render_report(alerts: &[PersistedAlert], symbol: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transaction Report");
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Alerts: {}", alerts.len());
    let _ = writeln!(out, "{}", "=".repeat(72));

    for a in alerts {
        let when = DateTime::<Utc>::from_timestamp(a.timestamp, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| a.timestamp.to_string());
        let labels = if a.labels.is_empty() { "None" } else { a.labels.as_str() };

        let _ = writeln!(out, "#{} {}", a.id, a.tx_hash);
        let _ = writeln!(out, "  From:     {}", a.sender);
        let _ = writeln!(out, "  To:       {}", a.receiver);
        let _ = writeln!(out, "  Amount:   {:.6} {}", a.value, symbol);
        let _ = writeln!(out, "  Time:     {}", when);
        let _ = writeln!(out, "  Detected: {}", labels);
        let _ = writeln!(out);
    }

    out
}

/// Read the whole store and write the report to `path`.
pub async fn export_report(pool: &SqlitePool, path: impl AsRef<Path>, symbol: &str) -> Result<usize, ReportError> {
    let alerts = alert::get_all_alerts(pool).await?;
    let body = render_report(&alerts, symbol, Utc::now());
    tokio::fs::write(path.as_ref(), body).await?;

    info!("Report with {} alerts written to {}", alerts.len(), path.as_ref().display());
    Ok(alerts.len())
}
