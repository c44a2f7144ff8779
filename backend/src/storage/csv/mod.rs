//! # CSV Storage Module
//!
//! File-based storage for the planner: every collection is one CSV snapshot
//! in the data directory, rewritten whole on each save.
//!
//! ## Files
//!
//! - `goals.csv` - the goal board, in board order
//! - `expenses.csv` - every expense, in insertion order
//! - `custom_categories.csv` - user-registered category names
//!
//! A missing file is an empty collection. A file that fails to parse is also
//! treated as empty, with a warning in the log.

pub mod category_repository;
pub mod connection;
pub mod expense_repository;
pub mod goal_repository;

#[cfg(test)]
pub mod test_utils;

use anyhow::Result;

pub use category_repository::CategoryRepository;
pub use connection::CsvConnection;
pub use expense_repository::ExpenseRepository;
pub use goal_repository::GoalRepository;

use crate::domain::models::expense::DomainExpense;
use crate::domain::models::goal::DomainGoal;
use crate::storage::traits::{CategoryStorage, ExpenseStorage, GoalStorage};

/// All three planner collections over one data directory
#[derive(Clone)]
pub struct CsvPlannerStorage {
    goals: GoalRepository,
    expenses: ExpenseRepository,
    categories: CategoryRepository,
}

impl CsvPlannerStorage {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            goals: GoalRepository::new(connection.clone()),
            expenses: ExpenseRepository::new(connection.clone()),
            categories: CategoryRepository::new(connection),
        }
    }
}

impl GoalStorage for CsvPlannerStorage {
    fn load_goals(&self) -> Vec<DomainGoal> {
        self.goals.load_goals()
    }

    fn save_goals(&self, goals: &[DomainGoal]) -> Result<()> {
        self.goals.save_goals(goals)
    }
}

impl ExpenseStorage for CsvPlannerStorage {
    fn load_expenses(&self) -> Vec<DomainExpense> {
        self.expenses.load_expenses()
    }

    fn save_expenses(&self, expenses: &[DomainExpense]) -> Result<()> {
        self.expenses.save_expenses(expenses)
    }
}

impl CategoryStorage for CsvPlannerStorage {
    fn load_custom_categories(&self) -> Vec<String> {
        self.categories.load_custom_categories()
    }

    fn save_custom_categories(&self, names: &[String]) -> Result<()> {
        self.categories.save_custom_categories(names)
    }
}
