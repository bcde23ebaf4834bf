// Expense domain module
// Contains the expense aggregate root, value objects, and domain events

#![allow(clippy::module_inception)]

pub mod events;
pub mod expense;
pub mod value_objects;

// Re-export main types for convenience
pub use expense::{Expense, NewExpense};
pub use value_objects::ExpenseStatus;
