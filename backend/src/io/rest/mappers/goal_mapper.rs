use shared::{CreateGoalRequest, Goal, GoalStatus};

use super::{format_dto_date, parse_dto_date};
use crate::domain::commands::goal::{CreateGoalCommand, MoveGoalCommand};
use crate::domain::models::goal::{DomainGoal, DomainGoalStatus};

pub struct GoalMapper;

impl GoalMapper {
    /// Convert shared GoalStatus to domain DomainGoalStatus
    pub fn status_to_domain(dto_status: GoalStatus) -> DomainGoalStatus {
        match dto_status {
            GoalStatus::Planning => DomainGoalStatus::Planning,
            GoalStatus::InProgress => DomainGoalStatus::InProgress,
            GoalStatus::Done => DomainGoalStatus::Done,
        }
    }

    /// Convert domain DomainGoalStatus to shared GoalStatus
    pub fn status_to_dto(domain_status: DomainGoalStatus) -> GoalStatus {
        match domain_status {
            DomainGoalStatus::Planning => GoalStatus::Planning,
            DomainGoalStatus::InProgress => GoalStatus::InProgress,
            DomainGoalStatus::Done => GoalStatus::Done,
        }
    }

    /// Convert domain DomainGoal to shared Goal DTO
    pub fn to_dto(domain: DomainGoal) -> Goal {
        let progress_percent = domain.progress_percent();
        Goal {
            id: domain.id,
            title: domain.title,
            amount: domain.amount,
            saved: domain.saved,
            deadline: format_dto_date(domain.deadline),
            status: Self::status_to_dto(domain.status),
            progress_percent,
        }
    }

    pub fn to_dto_list(domain_goals: Vec<DomainGoal>) -> Vec<Goal> {
        domain_goals.into_iter().map(Self::to_dto).collect()
    }

    /// Build the create command; fails on a malformed deadline
    pub fn to_create_command(request: CreateGoalRequest) -> Result<CreateGoalCommand, String> {
        Ok(CreateGoalCommand {
            deadline: parse_dto_date("deadline", &request.deadline)?,
            title: request.title,
            amount: request.amount,
        })
    }

    pub fn to_move_command(goal_id: String, status: GoalStatus) -> MoveGoalCommand {
        MoveGoalCommand {
            goal_id,
            status: Self::status_to_domain(status),
        }
    }
}
