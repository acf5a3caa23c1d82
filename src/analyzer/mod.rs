//! LLM-backed triage of one piece of feedback.
//!
//! `analyze` never fails: every provider or decode error is converted to the
//! fixed fallback result at exactly one point, after logging the detail for
//! the operator. Each call is a fresh external invocation — no retry, no
//! backoff, no caching.

use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;

use crate::llm::TextGenerator;

pub const FALLBACK_USER_RESPONSE: &str = "Thank you for your feedback!";
pub const FALLBACK_SUMMARY: &str = "AI Processing Error";
pub const FALLBACK_ACTIONS: &str = "Please review logs";

const DEFAULT_USER_RESPONSE: &str = "Thank you!";
const DEFAULT_FIELD: &str = "N/A";

/// The three triage outputs for one review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Customer-facing reply, two sentences at most by convention.
    pub user_response: String,
    /// Short free-text summary of the core issue or praise.
    pub summary: String,
    /// Recommended internal actions.
    pub actions: String,
}

impl AnalysisResult {
    /// Substitute used whenever the external service fails or returns
    /// unusable output.
    pub fn fallback() -> Self {
        Self {
            user_response: FALLBACK_USER_RESPONSE.to_string(),
            summary: FALLBACK_SUMMARY.to_string(),
            actions: FALLBACK_ACTIONS.to_string(),
        }
    }
}

/// Payload shape the model is asked to return. Every key is optional at the
/// decode layer; a missing key gets its per-key default rather than failing
/// the whole call.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    user_response: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    actions: Option<String>,
}

impl From<RawAnalysis> for AnalysisResult {
    fn from(raw: RawAnalysis) -> Self {
        Self {
            user_response: raw
                .user_response
                .unwrap_or_else(|| DEFAULT_USER_RESPONSE.to_string()),
            summary: raw.summary.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            actions: raw.actions.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        }
    }
}

pub struct FeedbackAnalyzer {
    provider: Arc<dyn TextGenerator>,
    model: String,
}

impl FeedbackAnalyzer {
    pub fn new(provider: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Triage one review. Infallible: failures are masked by the fallback
    /// result and their detail goes to the operator log only.
    pub async fn analyze(&self, review_text: &str, rating: u8) -> AnalysisResult {
        match self.request_analysis(review_text, rating).await {
            Ok(result) => result,
            Err(error) => {
                tracing::error!(
                    provider = self.provider.name(),
                    "feedback analysis failed, substituting fallback: {error:#}"
                );
                AnalysisResult::fallback()
            }
        }
    }

    async fn request_analysis(
        &self,
        review_text: &str,
        rating: u8,
    ) -> anyhow::Result<AnalysisResult> {
        let prompt = build_prompt(review_text, rating);
        let payload = self.provider.generate_json(&prompt, &self.model).await?;
        let raw: RawAnalysis = serde_json::from_str(payload.trim())
            .context("provider returned a non-JSON payload")?;
        Ok(raw.into())
    }
}

/// Fixed prompt template; the review text and rating are embedded verbatim.
fn build_prompt(review_text: &str, rating: u8) -> String {
    format!(
        "You are a customer service AI manager.\n\
         Analyze the following customer review:\n\
         \n\
         Review: \"{review_text}\"\n\
         Rating: {rating}/5\n\
         \n\
         Return a valid JSON object with exactly these 3 keys:\n\
         1. \"user_response\": A polite, empathetic response to the customer (max 2 sentences).\n\
         2. \"summary\": A very short 5-word summary of the core issue or praise.\n\
         3. \"actions\": A short string listing recommended internal actions (e.g., \"Check inventory, Train staff\").\n"
    )
}
