//! Postgres-backed implementation of the engine's `ScoreStore` capability.

use sqlx::PgPool;

use leadqual_core::{Lead, Offer};
use leadqual_engine::{ScoreStore, StoreError};

use crate::{leads, offers, results};

/// Adapts a [`PgPool`] to the engine's persistence interface.
///
/// The pool is opened once at startup and passed in; the store never
/// reconnects on its own.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ScoreStore for PgStore {
    async fn list_leads(&self) -> Result<Vec<Lead>, StoreError> {
        leads::list_leads(&self.pool).await.map_err(StoreError::new)
    }

    async fn latest_offer(&self) -> Result<Option<Offer>, StoreError> {
        offers::latest_offer(&self.pool)
            .await
            .map_err(StoreError::new)
    }

    async fn insert_result(
        &self,
        lead_id: i64,
        offer_id: i64,
        intent: &str,
        score: i32,
        reasoning: &str,
    ) -> Result<i64, StoreError> {
        results::insert_result(&self.pool, lead_id, offer_id, intent, score, reasoning)
            .await
            .map_err(StoreError::new)
    }
}
