use serde::Serialize;

/// Points contributed by each known intent tier.
pub const HIGH_POINTS: i32 = 50;
pub const MEDIUM_POINTS: i32 = 30;
pub const LOW_POINTS: i32 = 10;

/// Reasoning text used when the completion call fails outright.
pub const FALLBACK_REASONING: &str = "AI unavailable, defaulted to Medium";

/// Reasoning text used when a structured reply omits the `reasoning` field.
pub const DEFAULT_REASONING: &str = "AI analysis completed";

/// The classifier's judgment of one lead: a categorical label, a short
/// explanation, and the label's numeric contribution to the final score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub intent: String,
    pub reasoning: String,
    pub points: i32,
}

impl Verdict {
    /// The fixed verdict returned when the completion service is unreachable
    /// or its response cannot be used at all.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            intent: "Medium".to_string(),
            reasoning: FALLBACK_REASONING.to_string(),
            points: MEDIUM_POINTS,
        }
    }
}

/// How a completion text was turned into a verdict. Each stage of the
/// two-stage parse is represented explicitly so provenance stays inspectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentParse {
    /// The reply was the requested JSON object.
    Structured {
        intent: String,
        reasoning: String,
    },
    /// JSON parse failed but the text contained a known tier keyword; the
    /// full raw text becomes the reasoning.
    KeywordFallback {
        intent: &'static str,
        raw: String,
    },
    /// Neither stage matched; intent defaults to Medium with the raw text
    /// as reasoning.
    HardDefault {
        raw: String,
    },
}

impl IntentParse {
    /// Resolve the parse into a verdict, applying the intent→points table.
    ///
    /// An unknown structured label is passed through verbatim as the intent
    /// but scored as Medium — the displayed label and the numeric
    /// contribution are deliberately decoupled.
    #[must_use]
    pub fn into_verdict(self) -> Verdict {
        match self {
            IntentParse::Structured { intent, reasoning } => {
                let points = points_for_label(&intent);
                Verdict {
                    intent,
                    reasoning,
                    points,
                }
            }
            IntentParse::KeywordFallback { intent, raw } => Verdict {
                points: points_for_label(intent),
                intent: intent.to_string(),
                reasoning: raw,
            },
            IntentParse::HardDefault { raw } => Verdict {
                intent: "Medium".to_string(),
                reasoning: raw,
                points: MEDIUM_POINTS,
            },
        }
    }
}

/// Map an intent label to its point value. Labels outside the known tiers
/// score as Medium.
fn points_for_label(label: &str) -> i32 {
    match label {
        "High" => HIGH_POINTS,
        "Low" => LOW_POINTS,
        _ => MEDIUM_POINTS,
    }
}

/// One scored lead in a run's output.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSummary {
    pub lead_id: i64,
    pub name: String,
    pub role: String,
    pub company: String,
    pub intent: String,
    pub score: i32,
    pub reasoning: String,
}

/// The outcome of one full scoring run.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringRun {
    pub count: usize,
    pub results: Vec<LeadSummary>,
}
