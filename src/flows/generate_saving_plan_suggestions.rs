// Generate saving plan suggestions flow

use crate::error::FlowError;
use crate::llm::client::{GenerateRequest, GenerativeModel};
use crate::llm::prompts::{render_saving_plan_suggestions, PromptContext};
use crate::models::{GenerateSavingPlanSuggestionsInput, GenerateSavingPlanSuggestionsOutput};
use crate::schema::Schema;

fn output_schema() -> Schema {
    Schema::object().field(
        "suggestions",
        Schema::array(Schema::string())
            .describe("An array of personalized saving plan suggestions."),
    )
}

/// Generate personalized saving plan suggestions from a description of the
/// user's situation and goals. Suggestions come back in model order.
pub async fn generate_saving_plan_suggestions(
    model: &impl GenerativeModel,
    input: GenerateSavingPlanSuggestionsInput,
    ctx: &PromptContext,
) -> Result<GenerateSavingPlanSuggestionsOutput, FlowError> {
    input.validate()?;

    let rendered = render_saving_plan_suggestions(&input, ctx);
    let raw = model
        .generate(GenerateRequest {
            prompt: rendered.text,
            media: None,
            output_schema: output_schema(),
        })
        .await?;

    output_schema().validate(&raw)?;
    let output: GenerateSavingPlanSuggestionsOutput = serde_json::from_value(raw).map_err(|e| {
        FlowError::Generation(format!(
            "model output did not match the suggestions contract: {}",
            e
        ))
    })?;

    tracing::info!("Generated {} saving plan suggestions", output.suggestions.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::testing::StubModel;
    use serde_json::json;

    fn input() -> GenerateSavingPlanSuggestionsInput {
        GenerateSavingPlanSuggestionsInput {
            financial_situation: "Earning 80,000 PKR per month, renting".to_string(),
            goals: "Save for a motorbike within a year".to_string(),
        }
    }

    #[tokio::test]
    async fn test_suggestions_preserve_model_order() {
        let stub = StubModel::replying(json!({
            "suggestions": [
                "Open a separate savings account",
                "Automate a transfer on payday",
                "Join a committee with trusted friends"
            ]
        }));
        let output = generate_saving_plan_suggestions(&stub, input(), &PromptContext::default())
            .await
            .unwrap();
        assert_eq!(output.suggestions.len(), 3);
        assert_eq!(output.suggestions[0], "Open a separate savings account");
        assert_eq!(output.suggestions[2], "Join a committee with trusted friends");
    }

    #[tokio::test]
    async fn test_blank_situation_or_goals_fail_before_model_call() {
        let stub = StubModel::replying(json!({ "suggestions": [] }));
        let bad = GenerateSavingPlanSuggestionsInput {
            financial_situation: " ".to_string(),
            goals: "".to_string(),
        };
        let err = generate_saving_plan_suggestions(&stub, bad, &PromptContext::default())
            .await
            .unwrap_err();
        match err {
            FlowError::Validation(e) => {
                assert!(e.names_field("financialSituation"));
                assert!(e.names_field("goals"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_string_suggestion_is_rejected() {
        let stub = StubModel::replying(json!({ "suggestions": ["save", 42] }));
        let err = generate_saving_plan_suggestions(&stub, input(), &PromptContext::default())
            .await
            .unwrap_err();
        match err {
            FlowError::Validation(e) => assert!(e.names_field("suggestions[1]")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
