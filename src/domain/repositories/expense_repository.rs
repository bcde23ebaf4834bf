use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::WorkflowError;
use crate::domain::expense::Expense;

/// Repository trait for the Expense aggregate
///
/// Pure storage contract; business rules live in the domain layer. The one
/// storage-level rule is [`ExpenseRepository::complete_review`], which
/// serializes reviewer transitions per expense id.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Save an expense (insert or replace by id)
    async fn save(&self, expense: &Expense) -> Result<(), WorkflowError>;

    /// Find an expense by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, WorkflowError>;

    /// List every expense, newest first
    async fn list_all(&self) -> Result<Vec<Expense>, WorkflowError>;

    /// Persist a reviewer transition (status, approved_by, comments) as one
    /// write, only if the stored record is still pending
    ///
    /// When two reviewers race on the same claim, exactly one call lands;
    /// the other fails with `Conflict`. Fails with `NotFound` if the record
    /// no longer exists.
    async fn complete_review(&self, expense: &Expense) -> Result<(), WorkflowError>;
}
