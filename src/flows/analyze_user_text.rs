// Analyze user text flow - free-text financial insight ("Bachat Pal")

use crate::error::FlowError;
use crate::llm::client::{GenerateRequest, GenerativeModel};
use crate::llm::prompts::{render_analyze_user_text, PromptContext};
use crate::models::{AnalyzeUserTextInput, AnalyzeUserTextOutput};
use crate::schema::Schema;

fn output_schema() -> Schema {
    Schema::object().field(
        "analysis",
        Schema::string()
            .non_empty()
            .describe("The generated analysis of the user's text."),
    )
}

/// Analyze a user's free-text message and return a supportive financial
/// insight.
pub async fn analyze_user_text(
    model: &impl GenerativeModel,
    input: AnalyzeUserTextInput,
    ctx: &PromptContext,
) -> Result<AnalyzeUserTextOutput, FlowError> {
    input.validate()?;

    let rendered = render_analyze_user_text(&input, ctx);
    let raw = model
        .generate(GenerateRequest {
            prompt: rendered.text,
            media: None,
            output_schema: output_schema(),
        })
        .await?;

    output_schema().validate(&raw)?;
    serde_json::from_value(raw).map_err(|e| {
        FlowError::Generation(format!("model output did not match the analysis contract: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::testing::StubModel;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_more_message_yields_non_empty_analysis() {
        let stub = StubModel::replying(json!({
            "analysis": "Great goal! Try setting aside 500 PKR each week."
        }));
        let input = AnalyzeUserTextInput {
            text: "I want to save more this month".to_string(),
        };
        let output = analyze_user_text(&stub, input, &PromptContext::default())
            .await
            .unwrap();
        assert!(!output.analysis.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_fails_before_model_call() {
        let stub = StubModel::replying(json!({ "analysis": "unused" }));
        let input = AnalyzeUserTextInput {
            text: "".to_string(),
        };
        let err = analyze_user_text(&stub, input, &PromptContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_analysis_from_model_is_rejected() {
        let stub = StubModel::replying(json!({ "analysis": "" }));
        let input = AnalyzeUserTextInput {
            text: "How do I budget for Eid?".to_string(),
        };
        let err = analyze_user_text(&stub, input, &PromptContext::default())
            .await
            .unwrap_err();
        match err {
            FlowError::Validation(e) => assert!(e.names_field("analysis")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
