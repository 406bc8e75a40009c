//! Database operations for the `offers` table.

use sqlx::types::Json;
use sqlx::PgPool;

use leadqual_core::Offer;

use crate::DbError;

#[derive(Debug, sqlx::FromRow)]
struct OfferRow {
    id: i64,
    name: String,
    value_props: Json<Vec<String>>,
    ideal_use_cases: Json<Vec<String>>,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Offer {
            id: row.id,
            name: row.name,
            value_props: row.value_props.0,
            ideal_use_cases: row.ideal_use_cases.0,
        }
    }
}

/// Insert a new offer and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_offer(
    pool: &PgPool,
    name: &str,
    value_props: &[String],
    ideal_use_cases: &[String],
) -> Result<Offer, DbError> {
    let row = sqlx::query_as::<_, OfferRow>(
        "INSERT INTO offers (name, value_props, ideal_use_cases) \
         VALUES ($1, $2, $3) \
         RETURNING id, name, value_props, ideal_use_cases",
    )
    .bind(name)
    .bind(Json(value_props))
    .bind(Json(ideal_use_cases))
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// The most recently created offer (highest id), if any.
///
/// Scoring always runs against this offer — "latest offer" policy, not
/// "selected offer".
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_offer(pool: &PgPool) -> Result<Option<Offer>, DbError> {
    let row = sqlx::query_as::<_, OfferRow>(
        "SELECT id, name, value_props, ideal_use_cases \
         FROM offers \
         ORDER BY id DESC \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Offer::from))
}
