use axum::{extract::State, Json};
use serde::Deserialize;

use leadqual_core::Offer;

use super::{map_db_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CreateOfferRequest {
    pub name: String,
    pub value_props: Vec<String>,
    pub ideal_use_cases: Vec<String>,
}

/// `POST /offer` — define a new offer. Scoring always uses the most recently
/// created one.
pub(super) async fn create_offer(
    State(state): State<AppState>,
    Json(body): Json<CreateOfferRequest>,
) -> Result<Json<Offer>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::new("validation_error", "offer name is required"));
    }
    if body.value_props.is_empty() || body.ideal_use_cases.is_empty() {
        return Err(ApiError::new(
            "validation_error",
            "value_props and ideal_use_cases must not be empty",
        ));
    }

    let offer = leadqual_db::insert_offer(
        &state.pool,
        body.name.trim(),
        &body.value_props,
        &body.ideal_use_cases,
    )
    .await
    .map_err(|e| map_db_error(&e))?;

    tracing::info!(offer_id = offer.id, name = %offer.name, "offer created");
    Ok(Json(offer))
}
