//! Lead scoring engine.
//!
//! Combines a deterministic rule score (role, industry, data completeness;
//! capped at 50) with an AI intent classification (High/Medium/Low mapped to
//! 50/30/10 points) into a final score in [0, 100], and persists one result
//! row per lead through the [`ScoreStore`] capability trait.

pub mod classify;
pub mod error;
pub mod pipeline;
pub mod score;
pub mod store;
pub mod types;

pub use classify::{GroqClassifier, IntentClassifier};
pub use error::EngineError;
pub use pipeline::run_scoring;
pub use score::{combine_score, rule_score};
pub use store::{ScoreStore, StoreError};
pub use types::{IntentParse, LeadSummary, ScoringRun, Verdict};
