// AI flow routes
// Endpoints:
//   POST /v1/ai/categorize-receipt - receipt image to categorized items
//   POST /v1/ai/analyze-spending - expense list to analysis + recommendations
//   POST /v1/ai/analyze-text - free-text financial insight
//   POST /v1/ai/saving-suggestions - personalized saving plan suggestions
//   POST /v1/ai/send-email - email send (placeholder transport)
//
// All accept an optional ?lang=en|ur query parameter selecting the response
// language for the rendered prompt.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::error::FlowError;
use crate::flows;
use crate::llm::prompts::{Language, PromptContext};
use crate::models::{
    AnalyzeSpendingHabitsInput, AnalyzeSpendingHabitsOutput, AnalyzeUserTextInput,
    AnalyzeUserTextOutput, CategorizeBudgetItemsInput, CategorizeBudgetItemsOutput,
    GenerateSavingPlanSuggestionsInput, GenerateSavingPlanSuggestionsOutput, SendEmailInput,
    SendEmailOutput,
};
use crate::AppState;

/// Rendering options shared by all AI endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PromptOptions {
    /// Response language, "en" (default) or "ur"
    #[serde(default)]
    pub lang: Option<Language>,
}

impl PromptOptions {
    fn context(&self) -> PromptContext {
        PromptContext {
            language: self.lang.unwrap_or_default(),
        }
    }
}

/// Map a flow failure to an HTTP status, logging the underlying error.
/// Validation problems are the caller's to fix; transport and generation
/// failures are upstream; configuration failures are ours.
fn flow_error_status(invocation: &str, err: &FlowError) -> StatusCode {
    match err {
        FlowError::Validation(_) => {
            tracing::warn!("[{}] rejected: {}", invocation, err);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FlowError::Transport(_) | FlowError::Generation(_) => {
            tracing::error!("[{}] upstream failure ({}): {}", invocation, err.kind(), err);
            StatusCode::BAD_GATEWAY
        }
        FlowError::Configuration(_) => {
            tracing::error!("[{}] {}", invocation, err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn invocation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// POST /v1/ai/categorize-receipt
async fn categorize_receipt(
    State(state): State<AppState>,
    Query(options): Query<PromptOptions>,
    Json(input): Json<CategorizeBudgetItemsInput>,
) -> Result<Json<CategorizeBudgetItemsOutput>, StatusCode> {
    let invocation = invocation_id();
    tracing::info!(
        "[{}] Categorizing receipt against {} categories",
        invocation,
        input.budget_categories.len()
    );

    match flows::categorize_budget_items(state.model.as_ref(), input, &options.context()).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(flow_error_status(&invocation, &e)),
    }
}

/// POST /v1/ai/analyze-spending
async fn analyze_spending(
    State(state): State<AppState>,
    Query(options): Query<PromptOptions>,
    Json(input): Json<AnalyzeSpendingHabitsInput>,
) -> Result<Json<AnalyzeSpendingHabitsOutput>, StatusCode> {
    let invocation = invocation_id();
    tracing::info!(
        "[{}] Analyzing {} expenses for budget {}",
        invocation,
        input.expenses.len(),
        input.budget_id
    );

    match flows::analyze_spending_habits(state.model.as_ref(), input, &options.context()).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(flow_error_status(&invocation, &e)),
    }
}

/// POST /v1/ai/analyze-text
async fn analyze_text(
    State(state): State<AppState>,
    Query(options): Query<PromptOptions>,
    Json(input): Json<AnalyzeUserTextInput>,
) -> Result<Json<AnalyzeUserTextOutput>, StatusCode> {
    let invocation = invocation_id();
    tracing::info!(
        "[{}] Analyzing user text ({} chars)",
        invocation,
        input.text.chars().count()
    );

    match flows::analyze_user_text(state.model.as_ref(), input, &options.context()).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(flow_error_status(&invocation, &e)),
    }
}

/// POST /v1/ai/saving-suggestions
async fn saving_suggestions(
    State(state): State<AppState>,
    Query(options): Query<PromptOptions>,
    Json(input): Json<GenerateSavingPlanSuggestionsInput>,
) -> Result<Json<GenerateSavingPlanSuggestionsOutput>, StatusCode> {
    let invocation = invocation_id();
    tracing::info!("[{}] Generating saving plan suggestions", invocation);

    match flows::generate_saving_plan_suggestions(state.model.as_ref(), input, &options.context())
        .await
    {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(flow_error_status(&invocation, &e)),
    }
}

/// POST /v1/ai/send-email
async fn send_email(
    Json(input): Json<SendEmailInput>,
) -> Result<Json<SendEmailOutput>, StatusCode> {
    let invocation = invocation_id();
    tracing::info!("[{}] Sending email to {}", invocation, input.to);

    match flows::send_email(input).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(flow_error_status(&invocation, &e)),
    }
}

/// Build the AI flows router
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/ai/categorize-receipt", post(categorize_receipt))
        .route("/v1/ai/analyze-spending", post(analyze_spending))
        .route("/v1/ai/analyze-text", post(analyze_text))
        .route("/v1/ai/saving-suggestions", post(saving_suggestions))
        .route("/v1/ai/send-email", post(send_email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_map_to_distinct_statuses() {
        let validation = FlowError::from(crate::error::ValidationError::single(
            "text",
            "must be a non-empty string",
        ));
        assert_eq!(
            flow_error_status("test", &validation),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            flow_error_status("test", &FlowError::Transport("down".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            flow_error_status("test", &FlowError::Generation("bad".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            flow_error_status("test", &FlowError::Configuration("no key".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_lang_query_selects_language() {
        let options: PromptOptions = serde_json::from_value(serde_json::json!({ "lang": "ur" })).unwrap();
        assert_eq!(options.context().language, Language::Ur);
        let default = PromptOptions::default();
        assert_eq!(default.context().language, Language::En);
    }
}
