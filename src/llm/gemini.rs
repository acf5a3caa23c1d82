//! Google Gemini backend.
//!
//! Speaks the `generateContent` REST surface directly and asks for
//! JSON-constrained output via `generationConfig.responseMimeType`.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::build_http_client;
use super::traits::TextGenerator;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

const MAX_OUTPUT_TOKENS: u32 = 1024;

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_base_url(GEMINI_API_BASE, api_key, timeout)
    }

    /// Point the client at a non-default endpoint (local mock servers).
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key: api_key.into(),
            base_url,
            client: build_http_client(timeout),
        }
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    async fn call_api(&self, prompt: &str, model: &str) -> anyhow::Result<GenerateContentResponse> {
        let model_name = Self::model_name(model);
        let url = format!(
            "{}/v1beta/{model_name}:generateContent?key={}",
            self.base_url, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self.client.post(url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({status}): {error_text}");
        }

        let result: GenerateContentResponse = response.json().await?;

        if let Some(err) = result.error.as_ref() {
            anyhow::bail!("Gemini API error: {}", err.message);
        }

        Ok(result)
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        let text = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .map(|candidate| {
                let mut out = String::new();
                for part in &candidate.content.parts {
                    if let Some(t) = &part.text {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(t);
                    }
                }
                out
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("No response from Gemini");
        }

        Ok(text)
    }
}

impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate_json<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let result = self.call_api(prompt, model).await?;
            Self::extract_text(&result)
        })
    }
}

// ─── Wire types ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_parts(parts: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": parts}}]
        }))
        .unwrap()
    }

    #[test]
    fn model_name_adds_prefix_once() {
        assert_eq!(GeminiClient::model_name("gemini-2.5-flash"), "models/gemini-2.5-flash");
        assert_eq!(GeminiClient::model_name("models/gemini-2.5-flash"), "models/gemini-2.5-flash");
    }

    #[test]
    fn extract_text_joins_parts() {
        let response = response_with_parts(serde_json::json!([
            {"text": "{\"user_response\":"},
            {"text": "\"hi\"}"}
        ]));
        let text = GeminiClient::extract_text(&response).unwrap();
        assert_eq!(text, "{\"user_response\":\n\"hi\"}");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert!(GeminiClient::extract_text(&response).is_err());
    }

    #[test]
    fn extract_text_rejects_missing_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(GeminiClient::extract_text(&response).is_err());
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let client = GeminiClient::with_base_url(
            "http://localhost:1234/",
            "k",
            Duration::from_secs(1),
        );
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
