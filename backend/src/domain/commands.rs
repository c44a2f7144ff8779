//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod goal {
    use chrono::NaiveDate;

    use crate::domain::models::goal::{DomainGoal, DomainGoalStatus};

    /// Input for creating a new goal.
    #[derive(Debug, Clone)]
    pub struct CreateGoalCommand {
        pub title: String,
        pub amount: f64,
        pub deadline: NaiveDate,
    }

    /// Input for moving a goal to another board column.
    #[derive(Debug, Clone)]
    pub struct MoveGoalCommand {
        pub goal_id: String,
        pub status: DomainGoalStatus,
    }

    /// Result of a board move.
    #[derive(Debug, Clone, PartialEq)]
    pub enum MoveGoalOutcome {
        Moved(DomainGoal),
        /// Already in the requested column
        Unchanged(DomainGoal),
        NotFound,
    }
}

pub mod expense {
    use chrono::NaiveDate;

    use crate::domain::models::expense::DomainExpense;

    /// Which category the expense form selected.
    #[derive(Debug, Clone, PartialEq)]
    pub enum CategoryChoice {
        Existing(String),
        /// User-typed name to register (if unknown) and use
        New(String),
    }

    /// Input for creating an expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub title: String,
        pub amount: f64,
        pub category: CategoryChoice,
        /// Defaults to today
        pub date: Option<NaiveDate>,
        pub is_recurring: bool,
    }

    /// Input for editing an expense in place.
    #[derive(Debug, Clone)]
    pub struct UpdateExpenseCommand {
        pub expense_id: String,
        pub title: String,
        pub amount: f64,
        pub category: CategoryChoice,
        /// Defaults to today
        pub date: Option<NaiveDate>,
        pub is_recurring: bool,
    }

    /// Records appended by a create: the primary first, then its projection.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CreateExpenseResult {
        pub expense: DomainExpense,
        pub projected: Option<DomainExpense>,
    }

    impl CreateExpenseResult {
        pub fn into_vec(self) -> Vec<DomainExpense> {
            std::iter::once(self.expense).chain(self.projected).collect()
        }
    }
}
