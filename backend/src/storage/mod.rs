//! # Storage Module
//!
//! Handles all data persistence operations for the planner.
//!
//! The domain only sees the traits in [`traits`]; the concrete backend is a
//! directory of CSV snapshots, one file per collection. Another backend could
//! be swapped in without touching the domain or IO layers.
//!
//! ## Key Responsibilities
//!
//! - **Snapshot Persistence**: Saving a whole collection after each change
//! - **Fail-soft Loading**: Missing or malformed files load as empty
//! - **Atomic Writes**: Temp file + rename, so a crash never leaves half a file

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, CsvPlannerStorage};
pub use traits::{CategoryStorage, ExpenseStorage, GoalStorage, PlannerStorage, StorageKey};
