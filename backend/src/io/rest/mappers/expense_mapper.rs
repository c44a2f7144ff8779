use shared::{
    CategoryListResponse, CategoryTotal, CreateExpenseRequest, Expense, ExpenseSummaryResponse, MonthOption,
    UpdateExpenseRequest,
};

use super::{format_dto_date, parse_dto_date};
use crate::domain::commands::expense::{CategoryChoice, CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::models::category::{CategoryRegistry, DEFAULT_CATEGORIES};
use crate::domain::models::expense::DomainExpense;
use crate::domain::models::month::MonthFilter;
use crate::domain::summary_service::{category_percent, ExpenseSummary};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: DomainExpense) -> Expense {
        Expense {
            id: domain.id,
            title: domain.title,
            amount: domain.amount,
            category: domain.category,
            is_recurring: domain.is_recurring,
            date: domain.date.map(format_dto_date),
        }
    }

    pub fn to_dto_list(domain_expenses: Vec<DomainExpense>) -> Vec<Expense> {
        domain_expenses.into_iter().map(Self::to_dto).collect()
    }

    /// A typed new category name takes precedence over the selected one
    fn category_choice(category: Option<String>, new_category_name: Option<String>) -> CategoryChoice {
        match new_category_name {
            Some(name) => CategoryChoice::New(name),
            None => CategoryChoice::Existing(category.unwrap_or_default()),
        }
    }

    fn optional_date(date: Option<String>) -> Result<Option<chrono::NaiveDate>, String> {
        date.filter(|d| !d.trim().is_empty())
            .map(|d| parse_dto_date("date", &d))
            .transpose()
    }

    pub fn to_create_command(request: CreateExpenseRequest) -> Result<CreateExpenseCommand, String> {
        Ok(CreateExpenseCommand {
            date: Self::optional_date(request.date)?,
            category: Self::category_choice(request.category, request.new_category_name),
            title: request.title,
            amount: request.amount,
            is_recurring: request.is_recurring,
        })
    }

    pub fn to_update_command(expense_id: String, request: UpdateExpenseRequest) -> Result<UpdateExpenseCommand, String> {
        Ok(UpdateExpenseCommand {
            expense_id,
            date: Self::optional_date(request.date)?,
            category: Self::category_choice(request.category, request.new_category_name),
            title: request.title,
            amount: request.amount,
            is_recurring: request.is_recurring,
        })
    }

    pub fn month_option(filter: MonthFilter) -> MonthOption {
        MonthOption {
            value: filter.to_string(),
            label: filter.label(),
        }
    }

    pub fn to_summary_response(summary: ExpenseSummary) -> ExpenseSummaryResponse {
        let total = summary.total;
        let available_months = summary
            .available_months
            .into_iter()
            .map(MonthFilter::Month)
            .chain(std::iter::once(MonthFilter::All))
            .map(Self::month_option)
            .collect();
        let categories = summary
            .categories
            .into_iter()
            .map(|c| CategoryTotal {
                percent: category_percent(c.total, total),
                category: c.category,
                total: c.total,
            })
            .collect();

        ExpenseSummaryResponse {
            month: Self::month_option(summary.filter),
            available_months,
            expenses: Self::to_dto_list(summary.expenses),
            total,
            categories,
        }
    }

    pub fn to_category_list_response(registry: &CategoryRegistry) -> CategoryListResponse {
        CategoryListResponse {
            default_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            custom_categories: registry.custom().to_vec(),
            all_categories: registry.all_categories(),
        }
    }
}
