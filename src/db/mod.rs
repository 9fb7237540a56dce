pub mod alert;
pub mod connection;
pub mod migration;

pub const INIT_SCHEMA: &str = r#"
-- One row per alerted transaction; tx_hash is the dedup key
CREATE TABLE IF NOT EXISTS alerts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender TEXT NOT NULL,
    tx_hash TEXT NOT NULL UNIQUE,
    receiver TEXT NOT NULL,
    value REAL NOT NULL,
    timestamp INTEGER NOT NULL,
    labels TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_alerts_timestamp ON alerts(timestamp);
CREATE INDEX IF NOT EXISTS idx_alerts_sender ON alerts(sender);
"#;
