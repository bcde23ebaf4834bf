use uuid::Uuid;

use super::value_objects::{Email, Role};
use crate::domain::errors::WorkflowError;

/// User entity
///
/// # Invariants
/// - Name is never empty
/// - Department is present whenever the role is department-bound
/// - Role is fixed at creation
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    name: String,
    email: Email,
    password_hash: String,
    role: Role,
    department: Option<String>,
}

impl User {
    /// Creates a new User
    ///
    /// # Business Rules Enforced
    /// - Name must not be empty
    /// - `gestao` and `funcionario` users must belong to a department
    ///
    /// A blank department string counts as absent.
    pub fn new(
        name: String,
        email: Email,
        password_hash: String,
        role: Role,
        department: Option<String>,
    ) -> Result<Self, WorkflowError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(WorkflowError::Validation("name cannot be empty".to_string()));
        }

        let department = department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if role.requires_department() && department.is_none() {
            return Err(WorkflowError::Validation(format!(
                "a department is required for the {} role",
                role
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            department,
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Reconstructs a User from persistence layer data
    ///
    /// Bypasses invariant validation; only to be used by repository
    /// implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        name: String,
        email: Email,
        password_hash: String,
        role: Role,
        department: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            role,
            department,
        }
    }
}
