use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use leadqual_db::{ExportRow, JoinedResultRow};

use super::{map_db_error, ApiError, AppState};

/// `GET /results` — all scoring results joined with their leads, best
/// score first.
pub(super) async fn list_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<JoinedResultRow>>, ApiError> {
    let rows = leadqual_db::list_results_joined(&state.pool)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(rows))
}

/// `GET /results/export` — results as a CSV attachment.
pub(super) async fn export_results(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = leadqual_db::list_results_export(&state.pool)
        .await
        .map_err(|e| map_db_error(&e))?;

    if rows.is_empty() {
        return Err(ApiError::new("not_found", "no results found"));
    }

    let csv = render_csv(&rows)
        .map_err(|e| ApiError::new("internal_error", format!("CSV rendering failed: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=lead_scores.csv",
            ),
        ],
        csv,
    ))
}

fn render_csv(rows: &[ExportRow]) -> std::io::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
