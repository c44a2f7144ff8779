//! Domain model for an expense.
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::month::YearMonth;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainExpense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub is_recurring: bool,
    /// None only on legacy records; such expenses match no specific month
    pub date: Option<NaiveDate>,
}

impl DomainExpense {
    /// Month the expense falls in, if it is dated
    pub fn month(&self) -> Option<YearMonth> {
        self.date.map(YearMonth::from_date)
    }

    /// Build the sibling a recurring expense projects into the following month
    pub fn project_next_month(&self, id: String) -> Option<DomainExpense> {
        let date = next_month_date(self.date?)?;
        Some(DomainExpense {
            id,
            title: self.title.clone(),
            amount: self.amount,
            category: self.category.clone(),
            is_recurring: true,
            date: Some(date),
        })
    }
}

/// Same day next month, clamped to the last day of a shorter month
pub fn next_month_date(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(1))
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Expense title cannot be empty")]
    EmptyTitle,
    #[error("Expense amount must be positive")]
    NonPositiveAmount,
    #[error("Expense category cannot be empty")]
    EmptyCategory,
    #[error("New category name cannot be empty")]
    EmptyNewCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
