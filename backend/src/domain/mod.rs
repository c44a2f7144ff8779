//! # Domain Layer
//!
//! Business rules for the goal board and the expense planner.
//!
//! The mutation services ([`GoalService`], [`ExpenseService`]) are reducers
//! over an explicit [`PlannerState`]; they never touch storage. The
//! [`PlannerService`] owns the live state and calls the storage boundary
//! after each successful change. Aggregations in [`summary_service`] are pure
//! functions of the expense list.
//!
//! Identifiers and "today" come from injected [`IdGenerator`] and [`Clock`]
//! implementations so every rule is deterministic under test.

pub mod advice_service;
pub mod commands;
pub mod error;
pub mod expense_service;
pub mod goal_service;
pub mod id_generator;
pub mod models;
pub mod planner_service;
pub mod summary_service;

pub use advice_service::{AdviceError, AdviceProvider, AdviceService, GeminiAdviceProvider};
pub use error::PlannerError;
pub use expense_service::ExpenseService;
pub use goal_service::GoalService;
pub use id_generator::{Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock, UuidGenerator};
pub use models::state::PlannerState;
pub use planner_service::PlannerService;
