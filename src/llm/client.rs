// Model invocation client - Gemini generateContent REST API
// One request/response per flow invocation. No retries, no streaming; the
// caller decides whether a transport failure is worth retrying.

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::FlowError;
use crate::schema::Schema;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Base64 inline payload used for image parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

/// Top-level generateContent response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// One rendered model request: prompt text, optional image, and the schema
/// the output must conform to.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub media: Option<InlineData>,
    pub output_schema: Schema,
}

/// Seam over the hosted model so tests can swap in a deterministic stub.
pub trait GenerativeModel: Send + Sync {
    /// Submit one rendered prompt and return the parsed structured output.
    fn generate(
        &self,
        request: GenerateRequest,
    ) -> impl Future<Output = Result<Value, FlowError>> + Send;
}

/// Gemini REST client.
pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    /// Create a client from application config. A missing API key is not an
    /// error here; it fails the first invocation instead.
    pub fn from_config(config: &Config) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model
    }
}

impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<Value, FlowError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            FlowError::Configuration("GEMINI_API_KEY is not set".to_string())
        })?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, api_key
        );

        let mut parts = vec![Part::Text {
            text: request.prompt,
        }];
        if let Some(media) = request.media {
            parts.push(Part::InlineData { inline_data: media });
        }

        let body = GenerateContentBody {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.output_schema.to_wire(),
            },
        };

        tracing::debug!("Requesting structured output from {}", self.model);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| FlowError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            return Err(classify_http_failure(status, message));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| FlowError::Transport(format!("failed to read response body: {}", e)))?;

        if let Some(feedback) = envelope.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return Err(FlowError::Generation(format!("prompt blocked: {}", reason)));
            }
        }

        let candidate = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| FlowError::Generation("model returned no candidates".to_string()))?;

        let text = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .find_map(|part| match part {
                Part::Text { text } => Some(text),
                _ => None,
            })
            .ok_or_else(|| FlowError::Generation("model returned no text part".to_string()))?;

        serde_json::from_str(&text)
            .map_err(|e| FlowError::Generation(format!("model output is not valid JSON: {}", e)))
    }
}

/// Sort a non-2xx response into the error taxonomy.
fn classify_http_failure(status: StatusCode, message: String) -> FlowError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return FlowError::Configuration(format!("HTTP {}: {}", status.as_u16(), message));
    }
    if status == StatusCode::BAD_REQUEST && message.to_ascii_lowercase().contains("api key") {
        return FlowError::Configuration(message);
    }
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return FlowError::Transport(format!("HTTP {}: {}", status.as_u16(), message));
    }
    FlowError::Generation(format!("HTTP {}: {}", status.as_u16(), message))
}

static DATA_URI_RE: OnceLock<Regex> = OnceLock::new();

fn data_uri_re() -> &'static Regex {
    DATA_URI_RE.get_or_init(|| {
        Regex::new(r"^data:([a-zA-Z0-9.+-]+/[a-zA-Z0-9.+-]+);base64,([A-Za-z0-9+/=]+)$")
            .expect("data URI regex is valid")
    })
}

/// Split a `data:<mime>;base64,<payload>` URI into an inline media segment.
/// The payload must decode as base64.
pub fn parse_data_uri(uri: &str) -> Result<InlineData, &'static str> {
    let caps = data_uri_re()
        .captures(uri)
        .ok_or("must be a base64 data URI with a MIME type")?;
    let mime_type = caps[1].to_string();
    let data = caps[2].to_string();
    BASE64
        .decode(data.as_bytes())
        .map_err(|_| "must carry a valid base64 payload")?;
    Ok(InlineData { mime_type, data })
}
