// Models module

pub mod advisor;
pub mod budget;
pub mod email;

pub use advisor::{
    AnalyzeUserTextInput, AnalyzeUserTextOutput, GenerateSavingPlanSuggestionsInput,
    GenerateSavingPlanSuggestionsOutput,
};
pub use budget::{
    AnalyzeSpendingHabitsInput, AnalyzeSpendingHabitsOutput, BudgetItem,
    CategorizeBudgetItemsInput, CategorizeBudgetItemsOutput, ExpenseItem,
};
pub use email::{SendEmailInput, SendEmailOutput};
