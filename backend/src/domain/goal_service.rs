//! Goal service domain logic for the savings board.
//!
//! The service is a set of reducers over [`PlannerState`]: each operation
//! validates its input, then mutates the goal collection in place and tells
//! the caller whether anything changed. Persisting the result is left to the
//! caller.
//!
//! ## Business Rules
//!
//! - Titles must be non-empty, target amounts strictly positive
//! - New goals start at `saved = 0` in the Planning column
//! - Status is a manual board column: any column can be reached from any
//!   other, and it never touches `saved` or `amount`
//! - Deleting or moving an unknown goal is a silent no-op

use log::{debug, info};
use std::sync::Arc;

use crate::domain::commands::goal::{CreateGoalCommand, MoveGoalCommand, MoveGoalOutcome};
use crate::domain::error::is_valid_amount;
use crate::domain::id_generator::IdGenerator;
use crate::domain::models::goal::{DomainGoal, DomainGoalStatus, GoalValidationError};
use crate::domain::models::state::{Changes, PlannerState};

/// Service for managing goals on the board
#[derive(Clone)]
pub struct GoalService {
    ids: Arc<dyn IdGenerator>,
}

impl GoalService {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Check the required goal fields
    pub fn validate_create(command: &CreateGoalCommand) -> Result<(), GoalValidationError> {
        if command.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if !is_valid_amount(command.amount) {
            return Err(GoalValidationError::NonPositiveAmount);
        }
        Ok(())
    }

    /// Create a new goal in the Planning column
    pub fn create_goal(
        &self,
        state: &mut PlannerState,
        command: CreateGoalCommand,
    ) -> Result<DomainGoal, GoalValidationError> {
        Self::validate_create(&command)?;

        let goal = DomainGoal {
            id: self.ids.next_id(),
            title: command.title.trim().to_string(),
            amount: command.amount,
            saved: 0.0,
            deadline: command.deadline,
            status: DomainGoalStatus::Planning,
        };
        state.goals.push(goal.clone());

        info!("Created goal {} ({})", goal.id, goal.title);
        Ok(goal)
    }

    /// Remove a goal; unknown ids leave the board untouched
    pub fn delete_goal(&self, state: &mut PlannerState, goal_id: &str) -> Changes {
        let before = state.goals.len();
        state.goals.retain(|g| g.id != goal_id);

        if state.goals.len() == before {
            debug!("Delete skipped, goal {} not found", goal_id);
            return Changes::none();
        }
        info!("Deleted goal {}", goal_id);
        Changes::goals()
    }

    /// Move a goal to another board column
    pub fn move_goal(&self, state: &mut PlannerState, command: MoveGoalCommand) -> MoveGoalOutcome {
        let Some(goal) = state.goals.iter_mut().find(|g| g.id == command.goal_id) else {
            debug!("Move skipped, goal {} not found", command.goal_id);
            return MoveGoalOutcome::NotFound;
        };

        if goal.status == command.status {
            debug!("Goal {} already in {:?}", goal.id, goal.status);
            return MoveGoalOutcome::Unchanged(goal.clone());
        }

        info!("Moving goal {} from {:?} to {:?}", goal.id, goal.status, command.status);
        goal.status = command.status;
        MoveGoalOutcome::Moved(goal.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id_generator::SequentialIdGenerator;
    use chrono::NaiveDate;

    fn create_test_service() -> GoalService {
        GoalService::new(Arc::new(SequentialIdGenerator::new("goal")))
    }

    fn create_command(title: &str, amount: f64) -> CreateGoalCommand {
        CreateGoalCommand {
            title: title.to_string(),
            amount,
            deadline: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_create_goal() {
        let service = create_test_service();
        let mut state = PlannerState::default();

        let goal = service
            .create_goal(&mut state, create_command("  New laptop ", 4500.0))
            .expect("Failed to create goal");

        assert_eq!(goal.title, "New laptop");
        assert_eq!(goal.amount, 4500.0);
        assert_eq!(goal.saved, 0.0);
        assert_eq!(goal.status, DomainGoalStatus::Planning);
        assert_eq!(state.goals, vec![goal]);
    }

    #[test]
    fn test_create_goal_assigns_unused_ids() {
        let service = create_test_service();
        let mut state = PlannerState::default();

        let first = service.create_goal(&mut state, create_command("A", 1.0)).unwrap();
        let second = service.create_goal(&mut state, create_command("B", 2.0)).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(state.goals.len(), 2);
    }

    #[test]
    fn test_create_goal_validation() {
        let service = create_test_service();
        let mut state = PlannerState::default();

        let result = service.create_goal(&mut state, create_command("   ", 10.0));
        assert_eq!(result, Err(GoalValidationError::EmptyTitle));

        let result = service.create_goal(&mut state, create_command("Car", 0.0));
        assert_eq!(result, Err(GoalValidationError::NonPositiveAmount));

        let result = service.create_goal(&mut state, create_command("Car", -10.0));
        assert_eq!(result, Err(GoalValidationError::NonPositiveAmount));

        let result = service.create_goal(&mut state, create_command("Car", f64::NAN));
        assert_eq!(result, Err(GoalValidationError::NonPositiveAmount));

        assert!(state.goals.is_empty());
    }

    #[test]
    fn test_delete_goal() {
        let service = create_test_service();
        let mut state = PlannerState::default();
        let goal = service.create_goal(&mut state, create_command("Trip", 800.0)).unwrap();

        let changes = service.delete_goal(&mut state, &goal.id);

        assert!(changes.goals);
        assert!(state.goals.is_empty());
    }

    #[test]
    fn test_delete_unknown_goal_is_noop() {
        let service = create_test_service();
        let mut state = PlannerState::default();
        service.create_goal(&mut state, create_command("Trip", 800.0)).unwrap();
        let before = state.clone();

        let changes = service.delete_goal(&mut state, "missing");

        assert!(changes.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_goal_changes_only_status() {
        let service = create_test_service();
        let mut state = PlannerState::default();
        let mut goal = service.create_goal(&mut state, create_command("Bike", 1000.0)).unwrap();
        state.goals[0].saved = 250.0;
        goal.saved = 250.0;

        let outcome = service.move_goal(
            &mut state,
            MoveGoalCommand {
                goal_id: goal.id.clone(),
                status: DomainGoalStatus::Done,
            },
        );

        let expected = DomainGoal {
            status: DomainGoalStatus::Done,
            ..goal
        };
        assert_eq!(outcome, MoveGoalOutcome::Moved(expected.clone()));
        assert_eq!(state.goals[0], expected);
        assert_eq!(state.goals[0].progress_percent(), 25);
    }

    #[test]
    fn test_move_goal_back_from_done() {
        let service = create_test_service();
        let mut state = PlannerState::default();
        let goal = service.create_goal(&mut state, create_command("Bike", 1000.0)).unwrap();

        for status in [DomainGoalStatus::Done, DomainGoalStatus::Planning, DomainGoalStatus::InProgress] {
            let outcome = service.move_goal(
                &mut state,
                MoveGoalCommand {
                    goal_id: goal.id.clone(),
                    status,
                },
            );
            assert!(matches!(outcome, MoveGoalOutcome::Moved(_)));
            assert_eq!(state.goals[0].status, status);
        }
    }

    #[test]
    fn test_move_goal_to_same_column_is_unchanged() {
        let service = create_test_service();
        let mut state = PlannerState::default();
        let goal = service.create_goal(&mut state, create_command("Bike", 1000.0)).unwrap();

        let outcome = service.move_goal(
            &mut state,
            MoveGoalCommand {
                goal_id: goal.id.clone(),
                status: DomainGoalStatus::Planning,
            },
        );

        assert_eq!(outcome, MoveGoalOutcome::Unchanged(goal));
    }

    #[test]
    fn test_move_unknown_goal() {
        let service = create_test_service();
        let mut state = PlannerState::default();

        let outcome = service.move_goal(
            &mut state,
            MoveGoalCommand {
                goal_id: "missing".to_string(),
                status: DomainGoalStatus::Done,
            },
        );

        assert_eq!(outcome, MoveGoalOutcome::NotFound);
    }
}
