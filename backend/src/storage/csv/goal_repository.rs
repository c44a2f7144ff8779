//! # CSV Goal Repository
//!
//! Stores the goal board as a single snapshot file, `goals.csv`, in the
//! data directory. Row order is board order.
//!
//! ## CSV Format
//!
//! ```csv
//! id,title,amount,saved,deadline,status
//! 6f1c...,"New laptop",4500.0,0.0,2024-12-01,planning
//! 9a2e...,"Trip to the coast",1000.0,250.0,2024-06-01,in_progress
//! ```

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::connection::CsvConnection;
use crate::domain::error::is_valid_amount;
use crate::domain::models::goal::{DomainGoal, DomainGoalStatus};
use crate::storage::traits::{GoalStorage, StorageKey};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV record structure for goals
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoalRecord {
    id: String,
    title: String,
    amount: f64,
    saved: f64,
    deadline: String,
    status: String,
}

impl From<&DomainGoal> for GoalRecord {
    fn from(goal: &DomainGoal) -> Self {
        GoalRecord {
            id: goal.id.clone(),
            title: goal.title.clone(),
            amount: goal.amount,
            saved: goal.saved,
            deadline: goal.deadline.format(DATE_FORMAT).to_string(),
            status: goal.status.as_str().to_string(),
        }
    }
}

impl TryFrom<GoalRecord> for DomainGoal {
    type Error = anyhow::Error;

    fn try_from(record: GoalRecord) -> Result<Self> {
        if !is_valid_amount(record.amount) {
            return Err(anyhow!("Invalid amount {} on goal {}", record.amount, record.id));
        }
        if !record.saved.is_finite() || record.saved < 0.0 {
            return Err(anyhow!("Invalid saved amount {} on goal {}", record.saved, record.id));
        }
        let status = DomainGoalStatus::from_string(&record.status)
            .map_err(|e| anyhow!("Failed to parse goal status: {}", e))?;
        let deadline = NaiveDate::parse_from_str(record.deadline.trim(), DATE_FORMAT)
            .map_err(|e| anyhow!("Invalid deadline '{}' on goal {}: {}", record.deadline, record.id, e))?;

        Ok(DomainGoal {
            id: record.id,
            title: record.title,
            amount: record.amount,
            saved: record.saved,
            deadline,
            status,
        })
    }
}

/// CSV-based goal repository
#[derive(Clone)]
pub struct GoalRepository {
    connection: CsvConnection,
}

impl GoalRepository {
    /// Create a new CSV goal repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read the goal snapshot, failing on any malformed row
    fn read_goals(&self) -> Result<Vec<DomainGoal>> {
        let Some(mut reader) = self.connection.open_reader(StorageKey::Goals)? else {
            return Ok(Vec::new());
        };

        reader
            .deserialize::<GoalRecord>()
            .map(|row| DomainGoal::try_from(row?))
            .collect()
    }
}

impl GoalStorage for GoalRepository {
    fn load_goals(&self) -> Vec<DomainGoal> {
        match self.read_goals() {
            Ok(goals) => {
                debug!("Loaded {} goals", goals.len());
                goals
            }
            Err(e) => {
                warn!("Goal snapshot is unreadable, starting with an empty board: {:#}", e);
                if let Err(e) = self.connection.set_aside(StorageKey::Goals) {
                    error!("Failed to set aside goal snapshot: {:#}", e);
                }
                Vec::new()
            }
        }
    }

    fn save_goals(&self, goals: &[DomainGoal]) -> Result<()> {
        let records: Vec<GoalRecord> = goals.iter().map(GoalRecord::from).collect();
        self.connection.write_records(StorageKey::Goals, &records)
    }
}
