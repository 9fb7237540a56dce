use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::alert::insert_alert;
use crate::models::{ClassifiedAlert, Outcome};
use crate::notify::Notifier;

/// Persists alerts and sends one notification per newly stored hash.
pub struct AlertProcessor<N> {
    db_pool: SqlitePool,
    notifier: N,
}

impl<N: Notifier> AlertProcessor<N> {
    pub fn new(db_pool: SqlitePool, notifier: N) -> Self {
        Self { db_pool, notifier }
    }

    /// Insert-or-ignore on the transaction hash, then notify if the row is
    /// new. A failed notification is logged and does not undo the insert.
    pub async fn process(&self, alert: &ClassifiedAlert) -> Result<Outcome, sqlx::Error> {
        if !insert_alert(&self.db_pool, alert).await? {
            debug!("Alert for {} already recorded", alert.hash());
            return Ok(Outcome::DuplicateSkipped);
        }

        match self.notifier.notify(alert).await {
            Ok(()) => info!("Alert sent for {}", alert.hash()),
            Err(e) => warn!("Alert for {} stored but notification failed: {}", alert.hash(), e),
        }

        Ok(Outcome::Inserted)
    }
}
