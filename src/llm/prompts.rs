// Prompt templates and renderers
// Rendering is pure: the same validated input and context always produce a
// byte-identical prompt. List placeholders expand to one line per element,
// in input order.

use serde::{Deserialize, Serialize};

use crate::llm::client::{parse_data_uri, InlineData};
use crate::models::{
    AnalyzeSpendingHabitsInput, AnalyzeUserTextInput, CategorizeBudgetItemsInput,
    GenerateSavingPlanSuggestionsInput,
};

/// App languages a caller can request responses in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ur,
}

impl Language {
    fn instruction(self) -> &'static str {
        match self {
            Language::En => "",
            Language::Ur => "\n\nRespond in Urdu.",
        }
    }
}

/// Per-invocation rendering context. There is no app-global language state;
/// callers pass the selected language explicitly with every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptContext {
    pub language: Language,
}

/// A rendered prompt: instruction text plus an optional multimodal segment.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPrompt {
    pub text: String,
    pub media: Option<InlineData>,
}

const CATEGORIZE_BUDGET_ITEMS_PROMPT: &str = r#"You are an expert receipt processor for a budgeting app used in Pakistan. Analyze the attached receipt image and extract all line items. For each item, identify its name, price, and quantity. Categorize each item into one of the provided budget categories. The currency is Pakistani Rupees (PKR).

Available Categories:
{categories}

Extract the items and return them in the specified JSON format. If you cannot determine a field, use a reasonable default."#;

const ANALYZE_SPENDING_HABITS_PROMPT: &str = r#"You are a personal finance advisor. Analyze the user's spending habits and provide recommendations for staying within budget. The currency is Pakistani Rupees (PKR).

Expenses:
{expenses}

Analyze the expenses and provide recommendations."#;

const ANALYZE_USER_TEXT_PROMPT: &str = r#"You are Bachat Pal, a friendly and encouraging financial assistant for users in Pakistan. Your goal is to analyze the user's message and provide a clear, helpful, and actionable summary or insight.

Analyze the following user message for tone, intent, and key topics. Based on your analysis, provide a friendly and supportive response.

If the user expresses a desire to save money, improve their budget, or has a financial question, offer 1-2 concrete, simple, and actionable tips. Keep the tone conversational and positive. The currency is Pakistani Rupees (PKR).

User message: "{text}""#;

const SAVING_PLAN_SUGGESTIONS_PROMPT: &str = r#"You are a financial advisor specializing in creating personalized saving plans.

Based on the user's financial situation and goals, generate a list of saving plan suggestions.

Financial Situation: {financial_situation}
Goals: {goals}

Suggestions:"#;

/// Render the receipt-categorization prompt. The image travels as a
/// separate inline segment, never inlined into the text; the input must
/// already have passed validation for the segment to be present.
pub fn render_categorize_budget_items(
    input: &CategorizeBudgetItemsInput,
    ctx: &PromptContext,
) -> RenderedPrompt {
    let categories = input
        .budget_categories
        .iter()
        .map(|c| format!("- {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    RenderedPrompt {
        text: format!(
            "{}{}",
            CATEGORIZE_BUDGET_ITEMS_PROMPT.replace("{categories}", &categories),
            ctx.language.instruction()
        ),
        media: parse_data_uri(&input.receipt_data_uri).ok(),
    }
}

/// Render the spending-analysis prompt, one line per expense.
pub fn render_analyze_spending_habits(
    input: &AnalyzeSpendingHabitsInput,
    ctx: &PromptContext,
) -> RenderedPrompt {
    let expenses = input
        .expenses
        .iter()
        .map(|e| format!("- Name: {}, Category: {}, Amount: {}", e.name, e.category, e.price))
        .collect::<Vec<_>>()
        .join("\n");

    RenderedPrompt {
        text: format!(
            "{}{}",
            ANALYZE_SPENDING_HABITS_PROMPT.replace("{expenses}", &expenses),
            ctx.language.instruction()
        ),
        media: None,
    }
}

/// Render the free-text analysis prompt.
pub fn render_analyze_user_text(input: &AnalyzeUserTextInput, ctx: &PromptContext) -> RenderedPrompt {
    RenderedPrompt {
        text: format!(
            "{}{}",
            ANALYZE_USER_TEXT_PROMPT.replace("{text}", &input.text),
            ctx.language.instruction()
        ),
        media: None,
    }
}

/// Render the saving-plan suggestions prompt.
pub fn render_saving_plan_suggestions(
    input: &GenerateSavingPlanSuggestionsInput,
    ctx: &PromptContext,
) -> RenderedPrompt {
    RenderedPrompt {
        text: format!(
            "{}{}",
            SAVING_PLAN_SUGGESTIONS_PROMPT
                .replace("{financial_situation}", &input.financial_situation)
                .replace("{goals}", &input.goals),
            ctx.language.instruction()
        ),
        media: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseItem;

    fn receipt_input() -> CategorizeBudgetItemsInput {
        CategorizeBudgetItemsInput {
            receipt_data_uri: "data:image/png;base64,aGVsbG8=".to_string(),
            budget_categories: vec![
                "Groceries".to_string(),
                "Utilities".to_string(),
                "Transport".to_string(),
            ],
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let input = receipt_input();
        let ctx = PromptContext::default();
        let first = render_categorize_budget_items(&input, &ctx);
        let second = render_categorize_budget_items(&input, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_categories_render_in_input_order() {
        let rendered = render_categorize_budget_items(&receipt_input(), &PromptContext::default());
        let groceries = rendered.text.find("- Groceries").unwrap();
        let utilities = rendered.text.find("- Utilities").unwrap();
        let transport = rendered.text.find("- Transport").unwrap();
        assert!(groceries < utilities && utilities < transport);
    }

    #[test]
    fn test_receipt_image_is_a_separate_segment() {
        let rendered = render_categorize_budget_items(&receipt_input(), &PromptContext::default());
        let media = rendered.media.expect("image segment");
        assert_eq!(media.mime_type, "image/png");
        assert_eq!(media.data, "aGVsbG8=");
        assert!(!rendered.text.contains("aGVsbG8="));
        assert!(!rendered.text.contains("data:image"));
    }

    #[test]
    fn test_expenses_expand_one_line_each() {
        let input = AnalyzeSpendingHabitsInput {
            expenses: vec![
                ExpenseItem {
                    name: "Atta 10kg".to_string(),
                    category: "Groceries".to_string(),
                    price: 1250.0,
                },
                ExpenseItem {
                    name: "Rickshaw".to_string(),
                    category: "Transport".to_string(),
                    price: 300.0,
                },
            ],
            budget_id: "budget-1".to_string(),
        };
        let rendered = render_analyze_spending_habits(&input, &PromptContext::default());
        assert!(rendered
            .text
            .contains("- Name: Atta 10kg, Category: Groceries, Amount: 1250"));
        assert!(rendered
            .text
            .contains("- Name: Rickshaw, Category: Transport, Amount: 300"));
        assert!(rendered.media.is_none());
    }

    #[test]
    fn test_urdu_context_appends_instruction() {
        let input = AnalyzeUserTextInput {
            text: "I want to save more this month".to_string(),
        };
        let en = render_analyze_user_text(&input, &PromptContext::default());
        let ur = render_analyze_user_text(
            &input,
            &PromptContext {
                language: Language::Ur,
            },
        );
        assert!(!en.text.contains("Respond in Urdu."));
        assert!(ur.text.ends_with("Respond in Urdu."));
        assert!(ur.text.contains("I want to save more this month"));
    }
}
