use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::WorkflowError;
use crate::domain::user::{Email, User};

/// Repository trait for the User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> Result<Uuid, WorkflowError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WorkflowError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, WorkflowError>;
}
