use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel month filter value meaning "every expense, dated or not"
pub const ALL_MONTHS: &str = "all";

/// Board column a goal sits in. Purely user-assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    Planning,
    InProgress,
    Done,
}

impl GoalStatus {
    /// Board columns in display order
    pub const ALL: [GoalStatus; 3] = [GoalStatus::Planning, GoalStatus::InProgress, GoalStatus::Done];

    /// Column heading shown on the goals board
    pub fn column_title(&self) -> &'static str {
        match self {
            GoalStatus::Planning => "Planning",
            GoalStatus::InProgress => "Saving",
            GoalStatus::Done => "Achieved",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::Planning => write!(f, "Planning"),
            GoalStatus::InProgress => write!(f, "InProgress"),
            GoalStatus::Done => write!(f, "Done"),
        }
    }
}

/// A savings goal card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    /// Target amount
    pub amount: f64,
    /// Amount saved so far, may exceed the target
    pub saved: f64,
    /// Deadline date (YYYY-MM-DD)
    pub deadline: String,
    pub status: GoalStatus,
    /// min(100, round(saved / amount * 100))
    pub progress_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalListResponse {
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub amount: f64,
    /// Deadline date (YYYY-MM-DD)
    pub deadline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalResponse {
    pub goal: Goal,
    pub success_message: String,
}

/// Drop of a goal card onto a board column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveGoalRequest {
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveGoalResponse {
    pub goal: Goal,
    pub success_message: String,
}

/// A planned or incurred outlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub is_recurring: bool,
    /// Date (YYYY-MM-DD), absent on legacy records
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

/// Query string accepted by the expense list and summary endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseQuery {
    /// `YYYY-MM` or `all`; the current month when omitted
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub title: String,
    pub amount: f64,
    /// Existing category, ignored when `new_category_name` is set
    pub category: Option<String>,
    /// Custom category to register and use
    pub new_category_name: Option<String>,
    /// Date (YYYY-MM-DD); today when omitted
    pub date: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    /// The created expense followed by its projected sibling, if recurring
    pub expenses: Vec<Expense>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub title: String,
    pub amount: f64,
    pub category: Option<String>,
    pub new_category_name: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub default_categories: Vec<String>,
    pub custom_categories: Vec<String>,
    /// Defaults followed by custom categories
    pub all_categories: Vec<String>,
}

/// Register a custom category outside of an expense form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterCategoryRequest {
    pub name: String,
}

/// One row of the per-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Rounded share of the filtered total
    pub percent: u32,
}

/// Entry of the month selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthOption {
    /// `YYYY-MM` or `all`
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummaryResponse {
    /// The filter the summary was computed for
    pub month: MonthOption,
    /// Newest month first, `all` last
    pub available_months: Vec<MonthOption>,
    pub expenses: Vec<Expense>,
    pub total: f64,
    pub categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    /// Markdown answer, or a fixed fallback message
    pub answer: String,
}

/// Body returned with 4xx/5xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
