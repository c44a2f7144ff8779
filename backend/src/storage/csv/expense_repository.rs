//! # CSV Expense Repository
//!
//! Expenses are kept in insertion order in `expenses.csv`. The `date` column
//! may be blank on records written before expenses carried a date.
//!
//! ```csv
//! id,title,amount,category,is_recurring,date
//! 1d2c...,Rent,1200.0,Housing,true,2024-01-05
//! 77ab...,Old entry,35.5,Food,false,
//! ```

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::connection::CsvConnection;
use super::goal_repository::DATE_FORMAT;
use crate::domain::error::is_valid_amount;
use crate::domain::models::expense::DomainExpense;
use crate::storage::traits::{ExpenseStorage, StorageKey};

/// CSV record structure for expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseRecord {
    id: String,
    title: String,
    amount: f64,
    category: String,
    is_recurring: bool,
    date: Option<String>,
}

impl From<&DomainExpense> for ExpenseRecord {
    fn from(expense: &DomainExpense) -> Self {
        ExpenseRecord {
            id: expense.id.clone(),
            title: expense.title.clone(),
            amount: expense.amount,
            category: expense.category.clone(),
            is_recurring: expense.is_recurring,
            date: expense.date.map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }
}

impl TryFrom<ExpenseRecord> for DomainExpense {
    type Error = anyhow::Error;

    fn try_from(record: ExpenseRecord) -> Result<Self> {
        if !is_valid_amount(record.amount) {
            return Err(anyhow!("Invalid amount {} on expense {}", record.amount, record.id));
        }
        let date = match record.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_stored_date(raw).ok_or_else(|| {
                anyhow!("Invalid date '{}' on expense {}", raw, record.id)
            })?),
        };

        Ok(DomainExpense {
            id: record.id,
            title: record.title,
            amount: record.amount,
            category: record.category,
            is_recurring: record.is_recurring,
            date,
        })
    }
}

/// Accepts `YYYY-MM-DD` as well as full timestamps, which only keep their day
fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// CSV-based expense repository
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_expenses(&self) -> Result<Vec<DomainExpense>> {
        let Some(mut reader) = self.connection.open_reader(StorageKey::Expenses)? else {
            return Ok(Vec::new());
        };

        reader
            .deserialize::<ExpenseRecord>()
            .map(|row| DomainExpense::try_from(row?))
            .collect()
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn load_expenses(&self) -> Vec<DomainExpense> {
        match self.read_expenses() {
            Ok(expenses) => {
                debug!("Loaded {} expenses", expenses.len());
                expenses
            }
            Err(e) => {
                warn!("Expense snapshot is unreadable, starting with no expenses: {:#}", e);
                if let Err(e) = self.connection.set_aside(StorageKey::Expenses) {
                    error!("Failed to set aside expense snapshot: {:#}", e);
                }
                Vec::new()
            }
        }
    }

    fn save_expenses(&self, expenses: &[DomainExpense]) -> Result<()> {
        let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();
        self.connection.write_records(StorageKey::Expenses, &records)
    }
}
