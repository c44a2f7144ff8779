//! # Planner Service
//!
//! Owns the in-memory [`PlannerState`] for the running application and is
//! the only place where mutations meet persistence.
//!
//! Every mutation runs validate → reduce → persist while holding the state
//! lock, so two mutations never interleave. After a successful reduce the
//! changed collections are written as whole snapshots; a failed write is
//! logged and the mutation result is still returned.
//!
//! Queries clone what they need out of the lock and compute on the copy.

use log::{error, info};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::commands::expense::{CreateExpenseCommand, CreateExpenseResult, UpdateExpenseCommand};
use crate::domain::commands::goal::{CreateGoalCommand, MoveGoalCommand, MoveGoalOutcome};
use crate::domain::error::PlannerError;
use crate::domain::expense_service::ExpenseService;
use crate::domain::goal_service::GoalService;
use crate::domain::id_generator::{Clock, IdGenerator};
use crate::domain::models::category::CategoryRegistry;
use crate::domain::models::expense::DomainExpense;
use crate::domain::models::goal::DomainGoal;
use crate::domain::models::month::MonthFilter;
use crate::domain::models::state::{Changes, PlannerState};
use crate::domain::summary_service::{self, ExpenseSummary};
use crate::storage::PlannerStorage;

#[derive(Clone)]
pub struct PlannerService {
    state: Arc<Mutex<PlannerState>>,
    storage: Arc<dyn PlannerStorage>,
    goal_service: GoalService,
    expense_service: ExpenseService,
    clock: Arc<dyn Clock>,
}

impl PlannerService {
    /// Build a session from whatever the storage currently holds
    pub fn load(storage: Arc<dyn PlannerStorage>, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        let state = PlannerState {
            goals: storage.load_goals(),
            expenses: storage.load_expenses(),
            categories: CategoryRegistry::from_names(storage.load_custom_categories()),
        };
        info!(
            "Loaded planner state: {} goals, {} expenses, {} custom categories",
            state.goals.len(),
            state.expenses.len(),
            state.categories.custom().len()
        );

        Self {
            state: Arc::new(Mutex::new(state)),
            storage,
            goal_service: GoalService::new(ids.clone()),
            expense_service: ExpenseService::new(ids, clock.clone()),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlannerState> {
        // A panic mid-reduce cannot leave a half-applied change: reducers
        // validate before touching any collection.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mirror the changed collections to storage
    fn persist(&self, state: &PlannerState, changes: Changes) {
        if changes.goals {
            if let Err(e) = self.storage.save_goals(&state.goals) {
                error!("Failed to save goals: {:#}", e);
            }
        }
        if changes.expenses {
            if let Err(e) = self.storage.save_expenses(&state.expenses) {
                error!("Failed to save expenses: {:#}", e);
            }
        }
        if changes.categories {
            if let Err(e) = self.storage.save_custom_categories(state.categories.custom()) {
                error!("Failed to save custom categories: {:#}", e);
            }
        }
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// Copy of the whole state, for prompt building
    pub fn snapshot(&self) -> PlannerState {
        self.lock().clone()
    }

    // Goals

    pub fn goals(&self) -> Vec<DomainGoal> {
        self.lock().goals.clone()
    }

    pub fn create_goal(&self, command: CreateGoalCommand) -> Result<DomainGoal, PlannerError> {
        let mut state = self.lock();
        let goal = self.goal_service.create_goal(&mut state, command)?;
        self.persist(&state, Changes::goals());
        Ok(goal)
    }

    pub fn delete_goal(&self, goal_id: &str) {
        let mut state = self.lock();
        let changes = self.goal_service.delete_goal(&mut state, goal_id);
        self.persist(&state, changes);
    }

    pub fn move_goal(&self, command: MoveGoalCommand) -> MoveGoalOutcome {
        let mut state = self.lock();
        let outcome = self.goal_service.move_goal(&mut state, command);
        if matches!(outcome, MoveGoalOutcome::Moved(_)) {
            self.persist(&state, Changes::goals());
        }
        outcome
    }

    // Expenses

    pub fn expenses(&self, filter: MonthFilter) -> Vec<DomainExpense> {
        let expenses = self.lock().expenses.clone();
        summary_service::filter_by_month(&expenses, filter)
    }

    pub fn create_expense(&self, command: CreateExpenseCommand) -> Result<CreateExpenseResult, PlannerError> {
        let mut state = self.lock();
        let (result, changes) = self.expense_service.create_expense(&mut state, command)?;
        self.persist(&state, changes);
        Ok(result)
    }

    /// `Ok(None)` when the expense does not exist
    pub fn update_expense(&self, command: UpdateExpenseCommand) -> Result<Option<DomainExpense>, PlannerError> {
        let mut state = self.lock();
        let (updated, changes) = self.expense_service.update_expense(&mut state, command)?;
        self.persist(&state, changes);
        Ok(updated)
    }

    pub fn delete_expense(&self, expense_id: &str) {
        let mut state = self.lock();
        let changes = self.expense_service.delete_expense(&mut state, expense_id);
        self.persist(&state, changes);
    }

    // Categories

    pub fn categories(&self) -> CategoryRegistry {
        self.lock().categories.clone()
    }

    /// Returns true when the name was not known before
    pub fn register_category(&self, name: &str) -> Result<bool, PlannerError> {
        let mut state = self.lock();
        let changes = self.expense_service.register_category(&mut state, name)?;
        self.persist(&state, changes);
        Ok(changes.categories)
    }

    // Aggregations

    pub fn summary(&self, filter: MonthFilter) -> ExpenseSummary {
        let expenses = self.lock().expenses.clone();
        summary_service::expense_summary(&expenses, filter, self.clock.today())
    }
}
