// Categorize budget items flow - receipt image to categorized line items

use crate::error::FlowError;
use crate::llm::client::{GenerateRequest, GenerativeModel};
use crate::llm::prompts::{render_categorize_budget_items, PromptContext};
use crate::models::{CategorizeBudgetItemsInput, CategorizeBudgetItemsOutput};
use crate::schema::Schema;

fn output_schema(categories: &[String]) -> Schema {
    Schema::object().field(
        "budgetItems",
        Schema::array(
            Schema::object()
                .field(
                    "name",
                    Schema::string().non_empty().describe("The name of the item."),
                )
                .field(
                    "price",
                    Schema::number()
                        .minimum(0.0)
                        .describe("The price of the item."),
                )
                .field(
                    "quantity",
                    Schema::integer()
                        .minimum(1.0)
                        .describe("The quantity of the item."),
                )
                .field(
                    "category",
                    Schema::string()
                        .one_of(categories)
                        .describe("The category of the item from the provided list."),
                ),
        )
        .describe("A list of items found on the receipt."),
    )
}

/// Extract line items from a receipt image and sort each into one of the
/// caller's budget categories.
pub async fn categorize_budget_items(
    model: &impl GenerativeModel,
    input: CategorizeBudgetItemsInput,
    ctx: &PromptContext,
) -> Result<CategorizeBudgetItemsOutput, FlowError> {
    input.validate()?;

    let rendered = render_categorize_budget_items(&input, ctx);
    let raw = model
        .generate(GenerateRequest {
            prompt: rendered.text,
            media: rendered.media,
            output_schema: output_schema(&input.budget_categories),
        })
        .await?;

    // The wire schema constrains the category enum, but the model is
    // untrusted: structure is re-validated here and membership below.
    output_schema(&[]).validate(&raw)?;
    let output: CategorizeBudgetItemsOutput = serde_json::from_value(raw).map_err(|e| {
        FlowError::Generation(format!("model output did not match the item contract: {}", e))
    })?;

    for item in &output.budget_items {
        if !input.budget_categories.iter().any(|c| c == &item.category) {
            return Err(FlowError::Generation(format!(
                "item '{}' was assigned '{}', which is not an allowed category",
                item.name, item.category
            )));
        }
    }

    tracing::info!("Categorized {} receipt items", output.budget_items.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::testing::StubModel;
    use serde_json::json;

    fn input() -> CategorizeBudgetItemsInput {
        CategorizeBudgetItemsInput {
            receipt_data_uri: "data:image/jpeg;base64,aGVsbG8=".to_string(),
            budget_categories: vec!["Groceries".to_string(), "Transport".to_string()],
        }
    }

    #[tokio::test]
    async fn test_valid_response_is_returned_typed() {
        let stub = StubModel::replying(json!({
            "budgetItems": [
                { "name": "Atta 10kg", "price": 1250.0, "quantity": 1, "category": "Groceries" },
                { "name": "Rickshaw fare", "price": 300.0, "quantity": 2, "category": "Transport" }
            ]
        }));
        let output = categorize_budget_items(&stub, input(), &PromptContext::default())
            .await
            .unwrap();
        assert_eq!(output.budget_items.len(), 2);
        assert_eq!(output.budget_items[0].name, "Atta 10kg");
        assert_eq!(output.budget_items[1].quantity, 2);
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_out_of_list_category_fails_generation() {
        let stub = StubModel::replying(json!({
            "budgetItems": [
                { "name": "Gold ring", "price": 90000.0, "quantity": 1, "category": "Jewellery" }
            ]
        }));
        let err = categorize_budget_items(&stub, input(), &PromptContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "generation");
    }

    #[tokio::test]
    async fn test_empty_category_list_fails_before_model_call() {
        let stub = StubModel::replying(json!({ "budgetItems": [] }));
        let bad = CategorizeBudgetItemsInput {
            receipt_data_uri: "data:image/jpeg;base64,aGVsbG8=".to_string(),
            budget_categories: vec![],
        };
        let err = categorize_budget_items(&stub, bad, &PromptContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_item_fails_output_validation() {
        let stub = StubModel::replying(json!({
            "budgetItems": [
                { "name": "Atta 10kg", "price": "1250", "quantity": 1, "category": "Groceries" }
            ]
        }));
        let err = categorize_budget_items(&stub, input(), &PromptContext::default())
            .await
            .unwrap_err();
        match err {
            FlowError::Validation(e) => assert!(e.names_field("budgetItems[0].price")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
