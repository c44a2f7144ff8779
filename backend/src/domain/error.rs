use crate::domain::models::expense::ExpenseValidationError;
use crate::domain::models::goal::GoalValidationError;

/// Rejection raised before any state change
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Goal(#[from] GoalValidationError),
    #[error(transparent)]
    Expense(#[from] ExpenseValidationError),
}

/// Amounts must be finite and strictly positive
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}
