//! Persistence capability consumed by the scoring pipeline.

use thiserror::Error;

use leadqual_core::{Lead, Offer};

/// Opaque persistence failure. Wraps whatever the backing store raised;
/// the engine only needs to propagate it, never inspect it.
#[derive(Debug, Error)]
#[error("persistence error: {0}")]
pub struct StoreError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl StoreError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }
}

/// What the engine requires of a persistence backend.
///
/// The engine depends only on these signatures, never on a specific storage
/// implementation; the handle is passed into [`crate::run_scoring`]
/// explicitly rather than held as global state.
#[allow(async_fn_in_trait)]
pub trait ScoreStore {
    /// All imported leads, in storage order.
    async fn list_leads(&self) -> Result<Vec<Lead>, StoreError>;

    /// The most recently created offer (highest id), if any exists.
    async fn latest_offer(&self) -> Result<Option<Offer>, StoreError>;

    /// Append a new result row referencing an existing lead and offer.
    /// Repeated runs accumulate history; nothing is overwritten.
    /// Returns the new row's id.
    async fn insert_result(
        &self,
        lead_id: i64,
        offer_id: i64,
        intent: &str,
        score: i32,
        reasoning: &str,
    ) -> Result<i64, StoreError>;
}
