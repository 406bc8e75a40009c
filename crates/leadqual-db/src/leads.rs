//! Database operations for the `leads` table.

use sqlx::PgPool;

use leadqual_core::Lead;

use crate::DbError;

/// A lead as it arrives from bulk import, before it has an id.
#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub linkedin_bio: String,
}

#[derive(Debug, sqlx::FromRow)]
struct LeadRow {
    id: i64,
    name: String,
    role: String,
    company: String,
    industry: String,
    location: String,
    linkedin_bio: String,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id,
            name: row.name,
            role: row.role,
            company: row.company,
            industry: row.industry,
            location: row.location,
            linkedin_bio: row.linkedin_bio,
        }
    }
}

/// Insert one lead and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_lead(pool: &PgPool, lead: &NewLead) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO leads (name, role, company, industry, location, linkedin_bio) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id",
    )
    .bind(&lead.name)
    .bind(&lead.role)
    .bind(&lead.company)
    .bind(&lead.industry)
    .bind(&lead.location)
    .bind(&lead.linkedin_bio)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List all leads in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_leads(pool: &PgPool) -> Result<Vec<Lead>, DbError> {
    let rows = sqlx::query_as::<_, LeadRow>(
        "SELECT id, name, role, company, industry, location, linkedin_bio \
         FROM leads \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Lead::from).collect())
}
