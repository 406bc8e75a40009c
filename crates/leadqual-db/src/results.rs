//! Database operations for the `results` table.
//!
//! Results are append-only: repeated scoring runs add new rows per
//! (lead, offer) pair and history accumulates.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::DbError;

/// A result row joined with its lead, for the results listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct JoinedResultRow {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub company: String,
    pub intent: String,
    pub score: i32,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
}

/// A result row joined with its lead, shaped for CSV export.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ExportRow {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub intent: String,
    pub score: i32,
    pub reasoning: String,
}

/// Append a new scoring result and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including FK violations
/// for a missing lead or offer).
pub async fn insert_result(
    pool: &PgPool,
    lead_id: i64,
    offer_id: i64,
    intent: &str,
    score: i32,
    reasoning: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO results (lead_id, offer_id, intent, score, reasoning) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(lead_id)
    .bind(offer_id)
    .bind(intent)
    .bind(score)
    .bind(reasoning)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List all results joined with their leads, best score first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_results_joined(pool: &PgPool) -> Result<Vec<JoinedResultRow>, DbError> {
    let rows = sqlx::query_as::<_, JoinedResultRow>(
        "SELECT r.id, l.name, l.role, l.company, r.intent, r.score, r.reasoning, r.created_at \
         FROM results r \
         JOIN leads l ON r.lead_id = l.id \
         ORDER BY r.score DESC, r.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List all results in export shape (full lead identity, no timestamps),
/// best score first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_results_export(pool: &PgPool) -> Result<Vec<ExportRow>, DbError> {
    let rows = sqlx::query_as::<_, ExportRow>(
        "SELECT l.name, l.role, l.company, l.industry, l.location, \
                r.intent, r.score, r.reasoning \
         FROM results r \
         JOIN leads l ON r.lead_id = l.id \
         ORDER BY r.score DESC, r.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
