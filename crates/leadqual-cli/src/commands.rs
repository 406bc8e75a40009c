//! Subcommand implementations.

use std::path::Path;

use serde::Deserialize;
use sqlx::PgPool;

use leadqual_core::AppConfig;
use leadqual_db::{NewLead, PgStore};
use leadqual_engine::GroqClassifier;

/// One CSV row; absent columns deserialize to empty strings.
#[derive(Debug, Deserialize)]
struct CsvLead {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    industry: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    linkedin_bio: String,
}

impl From<CsvLead> for NewLead {
    fn from(row: CsvLead) -> Self {
        NewLead {
            name: row.name,
            role: row.role,
            company: row.company,
            industry: row.industry,
            location: row.location,
            linkedin_bio: row.linkedin_bio,
        }
    }
}

pub async fn import(pool: &PgPool, file: &Path) -> anyhow::Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file)?;

    let mut count = 0usize;
    for record in reader.deserialize::<CsvLead>() {
        let lead: NewLead = record?.into();
        leadqual_db::insert_lead(pool, &lead).await?;
        count += 1;
    }

    println!("imported {count} leads from {}", file.display());
    Ok(())
}

pub async fn create_offer(
    pool: &PgPool,
    name: &str,
    value_props: &[String],
    ideal_use_cases: &[String],
) -> anyhow::Result<()> {
    let offer = leadqual_db::insert_offer(pool, name, value_props, ideal_use_cases).await?;
    println!("created offer {} ({})", offer.id, offer.name);
    Ok(())
}

pub async fn score(pool: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let store = PgStore::new(pool.clone());
    let classifier = GroqClassifier::from_app_config(config)?;

    let run = leadqual_engine::run_scoring(&store, &classifier).await?;

    println!("scored {} leads", run.count);
    for summary in &run.results {
        println!(
            "  {:>3}  {:<8}  {} — {} ({})",
            summary.score, summary.intent, summary.name, summary.company, summary.role
        );
    }
    Ok(())
}

pub async fn results(pool: &PgPool) -> anyhow::Result<()> {
    let rows = leadqual_db::list_results_joined(pool).await?;
    if rows.is_empty() {
        println!("no results yet — import leads, create an offer, then run `score`");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{:>3}  {:<8}  {} — {} ({})  [{}]",
            row.score,
            row.intent,
            row.name,
            row.company,
            row.role,
            row.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
