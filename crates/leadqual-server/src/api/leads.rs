use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use leadqual_db::NewLead;

use super::{map_db_error, ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct UploadResponse {
    pub message: &'static str,
    pub count: usize,
}

/// `POST /leads/upload` — bulk import leads from a multipart CSV file.
///
/// Expected columns: `name,role,company,industry,location,linkedin_bio`.
/// Missing columns become empty strings; values are whitespace-trimmed.
pub(super) async fn upload_leads(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut csv_bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new("bad_request", format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::new("bad_request", format!("failed to read upload: {e}")))?;
            csv_bytes = Some(bytes.to_vec());
            break;
        }
    }

    let Some(csv_bytes) = csv_bytes else {
        return Err(ApiError::new("bad_request", "no file uploaded"));
    };

    let leads = parse_leads_csv(&csv_bytes)
        .map_err(|e| ApiError::new("bad_request", format!("invalid CSV: {e}")))?;

    if leads.is_empty() {
        return Err(ApiError::new("bad_request", "CSV contained no lead rows"));
    }

    let mut count = 0;
    for lead in &leads {
        leadqual_db::insert_lead(&state.pool, lead)
            .await
            .map_err(|e| map_db_error(&e))?;
        count += 1;
    }

    tracing::info!(count, "leads uploaded");
    Ok(Json(UploadResponse {
        message: "Leads uploaded successfully",
        count,
    }))
}

/// Parse CSV bytes into leads, mapping columns by header name.
fn parse_leads_csv(bytes: &[u8]) -> Result<Vec<NewLead>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let columns = [
        column("name"),
        column("role"),
        column("company"),
        column("industry"),
        column("location"),
        column("linkedin_bio"),
    ];

    let mut leads = Vec::new();
    for record in reader.records() {
        let record = record?;
        let get = |idx: Option<usize>| -> String {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        leads.push(NewLead {
            name: get(columns[0]),
            role: get(columns[1]),
            company: get(columns[2]),
            industry: get(columns[3]),
            location: get(columns[4]),
            linkedin_bio: get(columns[5]),
        });
    }
    Ok(leads)
}
