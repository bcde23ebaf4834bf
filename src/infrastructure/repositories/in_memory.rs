use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::WorkflowError;
use crate::domain::expense::{Expense, ExpenseStatus};
use crate::domain::repositories::{ExpenseRepository, UserRepository};
use crate::domain::user::{Email, User};

/// In-memory implementation of ExpenseRepository
///
/// Backs tests and database-less runs. Reviewer transitions go through the
/// same check-then-replace rule as the Postgres adapter, under a single
/// write lock, so a racing reviewer still loses with `Conflict`.
#[derive(Default)]
pub struct InMemoryExpenseRepository {
    records: RwLock<HashMap<Uuid, Expense>>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn save(&self, expense: &Expense) -> Result<(), WorkflowError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WorkflowError::Storage("expense store lock poisoned".to_string()))?;
        records.insert(expense.id(), expense.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, WorkflowError> {
        let records = self
            .records
            .read()
            .map_err(|_| WorkflowError::Storage("expense store lock poisoned".to_string()))?;
        Ok(records.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Expense>, WorkflowError> {
        let records = self
            .records
            .read()
            .map_err(|_| WorkflowError::Storage("expense store lock poisoned".to_string()))?;
        let mut expenses: Vec<Expense> = records.values().cloned().collect();
        expenses.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(expenses)
    }

    async fn complete_review(&self, expense: &Expense) -> Result<(), WorkflowError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WorkflowError::Storage("expense store lock poisoned".to_string()))?;

        match records.get(&expense.id()) {
            None => Err(WorkflowError::NotFound(expense.id())),
            Some(stored) if stored.status() != ExpenseStatus::Pending => Err(
                WorkflowError::Conflict("expense was already reviewed".to_string()),
            ),
            Some(_) => {
                records.insert(expense.id(), expense.clone());
                Ok(())
            }
        }
    }
}

/// In-memory implementation of UserRepository
///
/// Enforces the same email uniqueness as the database unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, WorkflowError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WorkflowError::Storage("user store lock poisoned".to_string()))?;

        if records.values().any(|u| u.email() == user.email()) {
            return Err(WorkflowError::Validation(
                "email already registered".to_string(),
            ));
        }

        let id = user.id();
        records.insert(id, user);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WorkflowError> {
        let records = self
            .records
            .read()
            .map_err(|_| WorkflowError::Storage("user store lock poisoned".to_string()))?;
        Ok(records.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, WorkflowError> {
        let records = self
            .records
            .read()
            .map_err(|_| WorkflowError::Storage("user store lock poisoned".to_string()))?;
        Ok(records.values().find(|u| u.email() == email).cloned())
    }
}
