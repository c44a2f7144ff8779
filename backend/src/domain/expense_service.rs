//! Expense service domain logic for the monthly planner.
//!
//! Reducers over [`PlannerState`] for creating, editing and deleting
//! expenses, including custom category registration and the one-shot
//! projection of recurring expenses into the following month.
//!
//! ## Business Rules
//!
//! - Titles non-empty, amounts strictly positive, category resolvable
//! - A new category name is trimmed, must be non-empty, and is registered
//!   only when neither a default nor an existing custom category
//! - A recurring expense created on D also creates a sibling on D + 1 month
//!   (clamped to month end). This happens only on creation: edits never add
//!   or remove siblings, and deletes never cascade
//! - Validation happens before any collection is touched

use log::{debug, info};
use std::sync::Arc;

use crate::domain::commands::expense::{
    CategoryChoice, CreateExpenseCommand, CreateExpenseResult, UpdateExpenseCommand,
};
use crate::domain::error::is_valid_amount;
use crate::domain::id_generator::{Clock, IdGenerator};
use crate::domain::models::category::CategoryRegistry;
use crate::domain::models::expense::{DomainExpense, ExpenseValidationError};
use crate::domain::models::state::{Changes, PlannerState};

/// Category the expense will carry, and whether the registry must learn it
#[derive(Debug, Clone, PartialEq)]
struct ResolvedCategory {
    name: String,
    register: bool,
}

/// Service for managing planned expenses
#[derive(Clone)]
pub struct ExpenseService {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl ExpenseService {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Create an expense, plus its next-month sibling when recurring
    pub fn create_expense(
        &self,
        state: &mut PlannerState,
        command: CreateExpenseCommand,
    ) -> Result<(CreateExpenseResult, Changes), ExpenseValidationError> {
        Self::validate_fields(&command.title, command.amount)?;
        let category = Self::resolve_category(&state.categories, &command.category)?;

        let mut changes = Changes::expenses();
        changes.categories = Self::apply_category(&mut state.categories, &category);

        let date = command.date.unwrap_or_else(|| self.clock.today());
        let expense = DomainExpense {
            id: self.ids.next_id(),
            title: command.title.trim().to_string(),
            amount: command.amount,
            category: category.name,
            is_recurring: command.is_recurring,
            date: Some(date),
        };

        let projected = if command.is_recurring {
            expense.project_next_month(self.ids.next_id())
        } else {
            None
        };

        state.expenses.push(expense.clone());
        if let Some(sibling) = &projected {
            state.expenses.push(sibling.clone());
            info!(
                "Created recurring expense {} on {} with projection {} on {:?}",
                expense.id, date, sibling.id, sibling.date
            );
        } else {
            info!("Created expense {} on {}", expense.id, date);
        }

        Ok((CreateExpenseResult { expense, projected }, changes))
    }

    /// Replace every mutable field of an expense in place.
    /// Returns `None` when the id is unknown; nothing is changed then.
    pub fn update_expense(
        &self,
        state: &mut PlannerState,
        command: UpdateExpenseCommand,
    ) -> Result<(Option<DomainExpense>, Changes), ExpenseValidationError> {
        Self::validate_fields(&command.title, command.amount)?;
        let category = Self::resolve_category(&state.categories, &command.category)?;

        let Some(index) = state.expenses.iter().position(|e| e.id == command.expense_id) else {
            debug!("Update skipped, expense {} not found", command.expense_id);
            return Ok((None, Changes::none()));
        };

        let mut changes = Changes::expenses();
        changes.categories = Self::apply_category(&mut state.categories, &category);

        let date = command.date.unwrap_or_else(|| self.clock.today());
        let expense = &mut state.expenses[index];
        expense.title = command.title.trim().to_string();
        expense.amount = command.amount;
        expense.category = category.name;
        expense.date = Some(date);
        expense.is_recurring = command.is_recurring;

        info!("Updated expense {}", expense.id);
        Ok((Some(expense.clone()), changes))
    }

    /// Remove one expense. Projected siblings are independent records.
    pub fn delete_expense(&self, state: &mut PlannerState, expense_id: &str) -> Changes {
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id != expense_id);

        if state.expenses.len() == before {
            debug!("Delete skipped, expense {} not found", expense_id);
            return Changes::none();
        }
        info!("Deleted expense {}", expense_id);
        Changes::expenses()
    }

    /// Register a custom category outside of an expense form
    pub fn register_category(&self, state: &mut PlannerState, name: &str) -> Result<Changes, ExpenseValidationError> {
        if name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyNewCategory);
        }
        let grew = state.categories.register(name);
        Ok(Changes {
            categories: grew,
            ..Changes::none()
        })
    }

    fn validate_fields(title: &str, amount: f64) -> Result<(), ExpenseValidationError> {
        if title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        if !is_valid_amount(amount) {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }

    fn resolve_category(
        registry: &CategoryRegistry,
        choice: &CategoryChoice,
    ) -> Result<ResolvedCategory, ExpenseValidationError> {
        match choice {
            CategoryChoice::Existing(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ExpenseValidationError::EmptyCategory);
                }
                if !registry.contains(name) {
                    return Err(ExpenseValidationError::UnknownCategory(name.to_string()));
                }
                Ok(ResolvedCategory {
                    name: name.to_string(),
                    register: false,
                })
            }
            CategoryChoice::New(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ExpenseValidationError::EmptyNewCategory);
                }
                Ok(ResolvedCategory {
                    name: name.to_string(),
                    register: !registry.contains(name),
                })
            }
        }
    }

    fn apply_category(registry: &mut CategoryRegistry, category: &ResolvedCategory) -> bool {
        if category.register && registry.register(&category.name) {
            info!("Registered custom category '{}'", category.name);
            return true;
        }
        false
    }
}
