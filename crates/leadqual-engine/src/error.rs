use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by a scoring run.
///
/// Classifier failures never appear here — the classifier degrades to a fixed
/// Medium verdict instead of propagating (see [`crate::classify`]).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no offer found; create an offer before scoring")]
    NoOffer,
    #[error("no leads found; upload leads before scoring")]
    NoLeads,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Internal failure modes of the completion call. Callers of
/// [`crate::classify::IntentClassifier::classify`] never see these; they are
/// logged and converted to the fallback verdict.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API returned status {0}")]
    Api(reqwest::StatusCode),

    #[error("unexpected completion response shape: {0}")]
    Shape(String),
}
