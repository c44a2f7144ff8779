pub mod category;
pub mod expense;
pub mod goal;
pub mod month;
pub mod state;
