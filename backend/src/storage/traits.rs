//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Each collection lives under its own fixed key and is always loaded and
//! saved as a whole snapshot. Loading is fail-soft: a missing or malformed
//! snapshot is an empty collection, never an error. Saving reports errors so
//! the caller can log them, but callers must not let them abort a mutation.

use anyhow::Result;

use crate::domain::models::expense::DomainExpense;
use crate::domain::models::goal::DomainGoal;

/// Fixed names of the three durable records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Goals,
    Expenses,
    CustomCategories,
}

impl StorageKey {
    pub fn name(&self) -> &'static str {
        match self {
            StorageKey::Goals => "goals",
            StorageKey::Expenses => "expenses",
            StorageKey::CustomCategories => "custom_categories",
        }
    }
}

/// Trait defining the interface for goal storage operations
pub trait GoalStorage: Send + Sync {
    /// Load every goal in board order; empty when absent or unreadable
    fn load_goals(&self) -> Vec<DomainGoal>;

    /// Replace the stored goals with this snapshot
    fn save_goals(&self, goals: &[DomainGoal]) -> Result<()>;
}

/// Trait defining the interface for expense storage operations
pub trait ExpenseStorage: Send + Sync {
    /// Load every expense in insertion order; empty when absent or unreadable
    fn load_expenses(&self) -> Vec<DomainExpense>;

    /// Replace the stored expenses with this snapshot
    fn save_expenses(&self, expenses: &[DomainExpense]) -> Result<()>;
}

/// Trait defining the interface for custom category storage operations
pub trait CategoryStorage: Send + Sync {
    /// Load custom category names in insertion order
    fn load_custom_categories(&self) -> Vec<String>;

    /// Replace the stored custom categories with this snapshot
    fn save_custom_categories(&self, names: &[String]) -> Result<()>;
}

/// A backend able to hold all three planner collections
pub trait PlannerStorage: GoalStorage + ExpenseStorage + CategoryStorage {}

impl<T: GoalStorage + ExpenseStorage + CategoryStorage> PlannerStorage for T {}
