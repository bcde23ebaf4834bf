// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_expense_repository;
pub mod postgres_user_repository;

pub use in_memory::{InMemoryExpenseRepository, InMemoryUserRepository};
pub use postgres_expense_repository::PostgresExpenseRepository;
pub use postgres_user_repository::PostgresUserRepository;
