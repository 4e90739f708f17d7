// Analyze spending habits flow - categorized expenses to analysis and
// recommendations

use crate::error::FlowError;
use crate::llm::client::{GenerateRequest, GenerativeModel};
use crate::llm::prompts::{render_analyze_spending_habits, PromptContext};
use crate::models::{AnalyzeSpendingHabitsInput, AnalyzeSpendingHabitsOutput};
use crate::schema::Schema;

fn output_schema() -> Schema {
    Schema::object()
        .field(
            "analysis",
            Schema::string()
                .non_empty()
                .describe("An analysis of the user's spending habits."),
        )
        .field(
            "recommendations",
            Schema::string()
                .non_empty()
                .describe("Recommendations for staying within budget."),
        )
}

/// Analyze a budget's categorized expenses and recommend how to stay within
/// budget.
pub async fn analyze_spending_habits(
    model: &impl GenerativeModel,
    input: AnalyzeSpendingHabitsInput,
    ctx: &PromptContext,
) -> Result<AnalyzeSpendingHabitsOutput, FlowError> {
    input.validate()?;

    let rendered = render_analyze_spending_habits(&input, ctx);
    let raw = model
        .generate(GenerateRequest {
            prompt: rendered.text,
            media: None,
            output_schema: output_schema(),
        })
        .await?;

    output_schema().validate(&raw)?;
    let output: AnalyzeSpendingHabitsOutput = serde_json::from_value(raw).map_err(|e| {
        FlowError::Generation(format!("model output did not match the analysis contract: {}", e))
    })?;

    tracing::info!(
        "Analyzed {} expenses for budget {}",
        input.expenses.len(),
        input.budget_id
    );
    Ok(output)
}
