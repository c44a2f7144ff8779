//! Application state owned by a planner session.
use super::category::CategoryRegistry;
use super::expense::DomainExpense;
use super::goal::DomainGoal;

/// The three top-level collections. Mutation services take it by `&mut`
/// and report which collections they touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerState {
    pub goals: Vec<DomainGoal>,
    pub expenses: Vec<DomainExpense>,
    pub categories: CategoryRegistry,
}

/// Collections a mutation changed, so the caller persists exactly those
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub goals: bool,
    pub expenses: bool,
    pub categories: bool,
}

impl Changes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn goals() -> Self {
        Self { goals: true, ..Self::default() }
    }

    pub fn expenses() -> Self {
        Self { expenses: true, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        !(self.goals || self.expenses || self.categories)
    }
}
