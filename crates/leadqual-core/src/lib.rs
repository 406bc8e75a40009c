//! Shared domain types and configuration for the leadqual workspace.

mod app_config;
mod config;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// A prospect imported via bulk upload. Immutable once stored; the scoring
/// engine only ever reads these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub linkedin_bio: String,
}

/// A seller's value-proposition definition. Scoring always runs against the
/// most recently created offer (highest id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub name: String,
    pub value_props: Vec<String>,
    pub ideal_use_cases: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
