//! Expense aggregations for the monthly planner.
//!
//! Everything here is a pure function of the expense collection and a
//! month filter, so views can recompute as often as their inputs change.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

use crate::domain::models::expense::DomainExpense;
use crate::domain::models::month::{MonthFilter, YearMonth};

/// Per-category total, in breakdown order
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
}

/// Everything the expense view shows for one month filter
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub filter: MonthFilter,
    pub available_months: Vec<YearMonth>,
    pub expenses: Vec<DomainExpense>,
    pub total: f64,
    pub categories: Vec<CategorySummary>,
}

/// Months that can be selected: the current month plus every month holding
/// a dated expense, newest first
pub fn available_months(expenses: &[DomainExpense], today: NaiveDate) -> Vec<YearMonth> {
    let mut months: BTreeSet<YearMonth> = expenses.iter().filter_map(DomainExpense::month).collect();
    months.insert(YearMonth::from_date(today));
    months.into_iter().rev().collect()
}

/// `All` keeps every expense; a month keeps only expenses dated in it
pub fn filter_by_month(expenses: &[DomainExpense], filter: MonthFilter) -> Vec<DomainExpense> {
    match filter {
        MonthFilter::All => expenses.to_vec(),
        MonthFilter::Month(month) => expenses
            .iter()
            .filter(|e| e.date.is_some_and(|d| month.contains(d)))
            .cloned()
            .collect(),
    }
}

pub fn total(expenses: &[DomainExpense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Totals per category, largest first. Equal totals keep the order in
/// which their category first appeared.
pub fn category_summary(expenses: &[DomainExpense]) -> Vec<CategorySummary> {
    let mut summary: Vec<CategorySummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match index.get(expense.category.as_str()) {
            Some(&i) => summary[i].total += expense.amount,
            None => {
                index.insert(expense.category.as_str(), summary.len());
                summary.push(CategorySummary {
                    category: expense.category.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    // sort_by is stable
    summary.sort_by(|a, b| b.total.total_cmp(&a.total));
    summary
}

/// Rounded share of `grand_total`; 0 when there is nothing to share
pub fn category_percent(category_total: f64, grand_total: f64) -> u32 {
    if grand_total == 0.0 || !grand_total.is_finite() {
        return 0;
    }
    let percent = (category_total / grand_total * 100.0).round();
    if percent.is_finite() && percent > 0.0 {
        percent as u32
    } else {
        0
    }
}

/// Filtered list, total and breakdown for one month selection
pub fn expense_summary(expenses: &[DomainExpense], filter: MonthFilter, today: NaiveDate) -> ExpenseSummary {
    let filtered = filter_by_month(expenses, filter);
    ExpenseSummary {
        filter,
        available_months: available_months(expenses, today),
        total: total(&filtered),
        categories: category_summary(&filtered),
        expenses: filtered,
    }
}
