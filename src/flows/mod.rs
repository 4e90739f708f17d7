// AI flows - one module per use case
// Each flow runs validate input -> render prompt -> invoke model -> validate
// output, failing fast at the first broken stage. No partial results.

pub mod analyze_spending_habits;
pub mod analyze_user_text;
pub mod categorize_budget_items;
pub mod generate_saving_plan_suggestions;
pub mod send_email;

pub use analyze_spending_habits::analyze_spending_habits;
pub use analyze_user_text::analyze_user_text;
pub use categorize_budget_items::categorize_budget_items;
pub use generate_saving_plan_suggestions::generate_saving_plan_suggestions;
pub use send_email::send_email;
