use axum::{extract::State, Json};
use serde::Serialize;

use leadqual_db::PgStore;
use leadqual_engine::{EngineError, LeadSummary};

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ScoreResponse {
    pub message: &'static str,
    pub count: usize,
    pub results: Vec<LeadSummary>,
}

/// `POST /score` — run one scoring pass over all leads against the latest
/// offer. Sequential by design; the response arrives only once every lead
/// has been classified and persisted.
pub(super) async fn run_scoring(
    State(state): State<AppState>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let store = PgStore::new(state.pool.clone());
    let run = leadqual_engine::run_scoring(&store, state.classifier.as_ref())
        .await
        .map_err(map_engine_error)?;

    Ok(Json(ScoreResponse {
        message: "Scoring completed",
        count: run.count,
        results: run.results,
    }))
}

fn map_engine_error(error: EngineError) -> ApiError {
    match error {
        EngineError::NoOffer | EngineError::NoLeads => {
            ApiError::new("bad_request", error.to_string())
        }
        EngineError::Store(e) => {
            tracing::error!(error = %e, "scoring run aborted by persistence failure");
            ApiError::new("internal_error", "scoring run failed while writing results")
        }
    }
}
