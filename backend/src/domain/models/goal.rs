//! Domain model for a savings goal.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DomainGoalStatus {
    Planning,
    InProgress,
    Done,
}

impl DomainGoalStatus {
    /// Convert to string for CSV storage
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainGoalStatus::Planning => "planning",
            DomainGoalStatus::InProgress => "in_progress",
            DomainGoalStatus::Done => "done",
        }
    }

    /// Parse from string for CSV loading
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "planning" => Ok(DomainGoalStatus::Planning),
            "in_progress" => Ok(DomainGoalStatus::InProgress),
            "done" => Ok(DomainGoalStatus::Done),
            _ => Err(format!("Invalid goal status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainGoal {
    pub id: String,
    pub title: String,
    /// Target amount, always positive
    pub amount: f64,
    pub saved: f64,
    pub deadline: NaiveDate,
    pub status: DomainGoalStatus,
}

impl DomainGoal {
    /// Share of the target already saved, capped at 100
    pub fn progress_percent(&self) -> u32 {
        if self.amount <= 0.0 {
            return 0;
        }
        let percent = (self.saved / self.amount * 100.0).round();
        percent.clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoalValidationError {
    #[error("Goal title cannot be empty")]
    EmptyTitle,
    #[error("Goal amount must be positive")]
    NonPositiveAmount,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(amount: f64, saved: f64) -> DomainGoal {
        DomainGoal {
            id: "goal-1".to_string(),
            title: "Trip".to_string(),
            amount,
            saved,
            deadline: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: DomainGoalStatus::Planning,
        }
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(goal(1000.0, 250.0).progress_percent(), 25);
        assert_eq!(goal(3.0, 1.0).progress_percent(), 33);
        assert_eq!(goal(100.0, 0.0).progress_percent(), 0);
    }

    #[test]
    fn test_progress_percent_is_capped() {
        assert_eq!(goal(100.0, 250.0).progress_percent(), 100);
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [DomainGoalStatus::Planning, DomainGoalStatus::InProgress, DomainGoalStatus::Done] {
            assert_eq!(DomainGoalStatus::from_string(status.as_str()), Ok(status));
        }
        assert_eq!(DomainGoalStatus::from_string("DONE"), Ok(DomainGoalStatus::Done));
        assert!(DomainGoalStatus::from_string("archived").is_err());
    }
}
