//! AI intent classification over an OpenAI-compatible chat-completions API.
//!
//! The production backend is Groq. The classifier never fails its caller:
//! transport or response-shape problems degrade to [`Verdict::fallback`],
//! and unparseable completion text runs through a two-stage fallback
//! ([`IntentParse`]) instead of erroring.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use leadqual_core::{AppConfig, Lead, Offer};

use crate::error::ClassifyError;
use crate::types::{IntentParse, Verdict, DEFAULT_REASONING};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Fixed sampling settings: deterministic output, bounded cost and latency.
const TEMPERATURE: f32 = 0.0;
const MAX_TOKENS: u32 = 150;

/// First occurrence of a tier keyword, case-insensitive, on word boundaries.
static INTENT_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(high|medium|low)\b").expect("intent keyword regex is valid")
});

/// Classifies a lead's buying intent against an offer.
///
/// `classify` is total: implementations must always produce a usable
/// [`Verdict`], absorbing their own failures.
#[allow(async_fn_in_trait)]
pub trait IntentClassifier {
    async fn classify(&self, lead: &Lead, offer: &Offer) -> Verdict;
}

/// Chat-completions client for intent classification.
///
/// Use [`GroqClassifier::new`] for production or
/// [`GroqClassifier::with_base_url`] to point at a mock server in tests.
pub struct GroqClassifier {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl GroqClassifier {
    /// Creates a classifier pointed at the Groq production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ClassifyError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a classifier from application config, honoring its base URL
    /// (`GROQ_BASE_URL`) so deployments can target a proxy or compatible
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ClassifyError> {
        Self::with_base_url(
            &config.groq_api_key,
            &config.groq_model,
            config.groq_timeout_secs,
            &config.groq_base_url,
        )
    }

    /// Creates a classifier with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Sends the prompt as a single user message and returns the first
    /// choice's text content.
    async fn request_completion(&self, prompt: &str) -> Result<String, ClassifyError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassifyError::Api(response.status()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Shape(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ClassifyError::Shape("response contained no choices".to_string()))?;

        Ok(choice.message.content)
    }
}

impl IntentClassifier for GroqClassifier {
    async fn classify(&self, lead: &Lead, offer: &Offer) -> Verdict {
        let prompt = build_prompt(lead, offer);
        match self.request_completion(&prompt).await {
            Ok(text) => parse_intent(text.trim()).into_verdict(),
            Err(e) => {
                tracing::warn!(lead_id = lead.id, error = %e, "intent classification failed, using fallback");
                Verdict::fallback()
            }
        }
    }
}

/// Render the qualification prompt for one lead against one offer.
fn build_prompt(lead: &Lead, offer: &Offer) -> String {
    format!(
        "You are a B2B lead qualification expert. Analyze this lead against the offer.\n\
         \n\
         Offer: {}\n\
         Value Props: {}\n\
         Ideal Use Cases: {}\n\
         \n\
         Lead:\n\
         - Name: {}\n\
         - Role: {}\n\
         - Company: {}\n\
         - Industry: {}\n\
         - Location: {}\n\
         - LinkedIn Bio: {}\n\
         \n\
         Classify this lead's intent as High, Medium, or Low. Respond ONLY with valid JSON in this exact format:\n\
         {{\"intent\":\"High\",\"reasoning\":\"Your 1-2 sentence explanation here\"}}",
        offer.name,
        offer.value_props.join(", "),
        offer.ideal_use_cases.join(", "),
        lead.name,
        lead.role,
        lead.company,
        lead.industry,
        lead.location,
        lead.linkedin_bio,
    )
}

/// Two-stage parse of the completion text.
///
/// Stage (a): strict JSON parse of the expected `{"intent","reasoning"}`
/// object. Stage (b): case-insensitive scan for the first tier keyword,
/// reported canonically capitalized. Neither matching yields the hard
/// default (Medium, raw text as reasoning).
fn parse_intent(raw: &str) -> IntentParse {
    if let Ok(reply) = serde_json::from_str::<StructuredReply>(raw) {
        return IntentParse::Structured {
            intent: reply.intent.unwrap_or_else(|| "Medium".to_string()),
            reasoning: reply
                .reasoning
                .unwrap_or_else(|| DEFAULT_REASONING.to_string()),
        };
    }

    if let Some(m) = INTENT_KEYWORD.find(raw) {
        let intent = match m.as_str().to_lowercase().as_str() {
            "high" => "High",
            "low" => "Low",
            _ => "Medium",
        };
        return IntentParse::KeywordFallback {
            intent,
            raw: raw.to_string(),
        };
    }

    IntentParse::HardDefault {
        raw: raw.to_string(),
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct StructuredReply {
    intent: Option<String>,
    reasoning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HIGH_POINTS, LOW_POINTS, MEDIUM_POINTS};

    #[test]
    fn structured_reply_parses_directly() {
        let parse = parse_intent(r#"{"intent":"High","reasoning":"Decision maker in target ICP"}"#);
        assert_eq!(
            parse,
            IntentParse::Structured {
                intent: "High".into(),
                reasoning: "Decision maker in target ICP".into(),
            }
        );
        let verdict = parse.into_verdict();
        assert_eq!(verdict.points, HIGH_POINTS);
    }

    #[test]
    fn structured_reply_without_reasoning_gets_default() {
        let verdict = parse_intent(r#"{"intent":"Low"}"#).into_verdict();
        assert_eq!(verdict.intent, "Low");
        assert_eq!(verdict.reasoning, DEFAULT_REASONING);
        assert_eq!(verdict.points, LOW_POINTS);
    }

    #[test]
    fn unknown_structured_label_passes_through_but_scores_medium() {
        let verdict = parse_intent(r#"{"intent":"Urgent","reasoning":"hot lead"}"#).into_verdict();
        assert_eq!(verdict.intent, "Urgent");
        assert_eq!(verdict.points, MEDIUM_POINTS);
    }

    #[test]
    fn keyword_fallback_keeps_raw_text_as_reasoning() {
        let raw = "The lead shows High intent based on their role.";
        let parse = parse_intent(raw);
        assert_eq!(
            parse,
            IntentParse::KeywordFallback {
                intent: "High",
                raw: raw.into(),
            }
        );
        let verdict = parse.into_verdict();
        assert_eq!(verdict.intent, "High");
        assert_eq!(verdict.reasoning, raw);
        assert_eq!(verdict.points, HIGH_POINTS);
    }

    #[test]
    fn keyword_fallback_is_case_insensitive_and_canonicalizes() {
        let verdict = parse_intent("intent: low, not a fit").into_verdict();
        assert_eq!(verdict.intent, "Low");
        assert_eq!(verdict.points, LOW_POINTS);
    }

    #[test]
    fn keyword_fallback_respects_word_boundaries() {
        // "highway" must not match the High tier.
        let verdict = parse_intent("company operates highway logistics").into_verdict();
        assert_eq!(verdict.intent, "Medium");
    }

    #[test]
    fn unparseable_text_defaults_to_medium_with_raw_reasoning() {
        let raw = "I cannot classify this lead.";
        let parse = parse_intent(raw);
        assert_eq!(parse, IntentParse::HardDefault { raw: raw.into() });
        let verdict = parse.into_verdict();
        assert_eq!(verdict.intent, "Medium");
        assert_eq!(verdict.reasoning, raw);
        assert_eq!(verdict.points, MEDIUM_POINTS);
    }

    #[test]
    fn prompt_includes_offer_and_lead_fields() {
        let offer = Offer {
            id: 1,
            name: "Outbound Automation".into(),
            value_props: vec!["24/7 outreach".into(), "6x meetings".into()],
            ideal_use_cases: vec!["B2B SaaS mid-market".into()],
        };
        let lead = Lead {
            id: 7,
            name: "Ava Patel".into(),
            role: "Head of Growth".into(),
            company: "FlowMetrics".into(),
            industry: "SaaS".into(),
            location: "Austin".into(),
            linkedin_bio: "Scaling outbound teams".into(),
        };
        let prompt = build_prompt(&lead, &offer);
        assert!(prompt.contains("Offer: Outbound Automation"));
        assert!(prompt.contains("Value Props: 24/7 outreach, 6x meetings"));
        assert!(prompt.contains("Ideal Use Cases: B2B SaaS mid-market"));
        assert!(prompt.contains("- Role: Head of Growth"));
        assert!(prompt.contains("- LinkedIn Bio: Scaling outbound teams"));
        assert!(prompt.contains(r#"{"intent":"High","reasoning":"#));
    }
}
