// Configuration - Environment variables

use std::env;

/// Default model identifier for generateContent calls
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Application configuration loaded from environment
#[derive(Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Gemini API key for LLM calls (GOOGLE_API_KEY accepted as fallback)
    pub gemini_api_key: Option<String>,
    /// Model identifier used for all flows
    pub gemini_model: String,
    /// Deadline for a single model call, in seconds
    pub gemini_timeout_secs: u64,
    /// Log file path for the file tracing layer
    pub log_file: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .or_else(|| env::var("GOOGLE_API_KEY").ok()),
            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            log_file: env::var("BACHAT_LOG_FILE")
                .ok()
                .unwrap_or_else(|| "/tmp/bachat-backend.log".to_string()),
        }
    }

    /// Validate that required configuration is present
    pub fn validate(&self) -> Result<(), String> {
        if self.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set - AI flows will fail at first invocation");
        }
        Ok(())
    }
}
