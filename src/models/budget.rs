// Budget flow contracts - receipt categorization and spending analysis
// Wire field names are camelCase to match the app's JSON contracts.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, Violations};
use crate::llm::client::parse_data_uri;

/// Input for receipt categorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeBudgetItemsInput {
    /// Photo of a receipt as a data URI: `data:<mimetype>;base64,<encoded_data>`
    pub receipt_data_uri: String,
    /// Budget categories the items must be sorted into
    pub budget_categories: Vec<String>,
}

impl CategorizeBudgetItemsInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut out = Violations::new();

        match parse_data_uri(&self.receipt_data_uri) {
            Ok(media) => {
                if !media.mime_type.starts_with("image/") {
                    out.push("receiptDataUri", "must carry an image MIME type");
                }
            }
            Err(rule) => out.push("receiptDataUri", rule),
        }

        if self.budget_categories.is_empty() {
            out.push("budgetCategories", "must not be empty");
        }
        for (i, category) in self.budget_categories.iter().enumerate() {
            if category.trim().is_empty() {
                out.push(
                    format!("budgetCategories[{}]", i),
                    "must be a non-empty string",
                );
            }
        }

        out.into_result()
    }
}

/// One categorized line item from a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    /// One of the categories supplied with the request
    pub category: String,
}

/// Output of receipt categorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeBudgetItemsOutput {
    pub budget_items: Vec<BudgetItem>,
}

/// One expense fed into spending analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// Input for spending-habit analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSpendingHabitsInput {
    pub expenses: Vec<ExpenseItem>,
    /// Opaque id of the originating budget record
    pub budget_id: String,
}

impl AnalyzeSpendingHabitsInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut out = Violations::new();

        if self.expenses.is_empty() {
            out.push("expenses", "must not be empty");
        }
        for (i, expense) in self.expenses.iter().enumerate() {
            if expense.name.trim().is_empty() {
                out.push(format!("expenses[{}].name", i), "must be a non-empty string");
            }
            if expense.category.trim().is_empty() {
                out.push(
                    format!("expenses[{}].category", i),
                    "must be a non-empty string",
                );
            }
            if expense.price < 0.0 {
                out.push(format!("expenses[{}].price", i), "must be at least 0");
            }
        }
        if self.budget_id.trim().is_empty() {
            out.push("budgetId", "must be a non-empty string");
        }

        out.into_result()
    }
}

/// Output of spending-habit analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeSpendingHabitsOutput {
    /// Analysis of the user's spending habits
    pub analysis: String,
    /// Recommendations for staying within budget
    pub recommendations: String,
}
