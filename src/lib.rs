// Bachat Buddy backend
// AI-flow invocation layer for the savings app: typed flow contracts,
// deterministic prompt rendering, and structured-output calls to the hosted
// Gemini model, plus the HTTP surface the app talks to.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod flows;
pub mod llm;
pub mod models;
pub mod routes;
pub mod schema;

use config::Config;
use llm::GeminiClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<GeminiClient>,
    pub config: Arc<Config>,
}
