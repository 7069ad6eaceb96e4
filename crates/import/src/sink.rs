//! Keyed storage for reconciled rugs.

use std::future::Future;

use rugcat_core::reconcile::{NewRug, UpsertOutcome};
use rugcat_db::repositories::RugRepo;
use rugcat_db::DbPool;

/// Storage that upserts rugs by `rug_number` and reports whether the
/// record was created or updated.
pub trait RugSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn upsert(
        &self,
        rug: &NewRug,
    ) -> impl Future<Output = Result<UpsertOutcome, Self::Error>> + Send;
}

/// [`RugSink`] backed by the `rugs` table.
#[derive(Clone)]
pub struct PgRugSink {
    pool: DbPool,
}

impl PgRugSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RugSink for PgRugSink {
    type Error = sqlx::Error;

    async fn upsert(&self, rug: &NewRug) -> Result<UpsertOutcome, sqlx::Error> {
        let stored = RugRepo::upsert(&self.pool, rug).await?;
        Ok(UpsertOutcome::classify(stored.created_at, stored.updated_at))
    }
}
