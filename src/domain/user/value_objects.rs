use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::WorkflowError;

/// Access level of a user
///
/// The role is fixed at registration and never inferred. Department-bound
/// roles (`Gestao`, `Funcionario`) must carry a department; see
/// [`crate::domain::user::User::new`].
///
/// # Example
/// ```
/// use expensetrack_api::domain::user::value_objects::Role;
///
/// let role = Role::parse("gestao").expect("known role");
/// assert!(role.is_reviewer());
/// assert!(role.requires_department());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access across all departments
    Admin,
    /// Finance staff, review-only across all departments
    Financeiro,
    /// Department manager, scoped to their own department
    Gestao,
    /// Employee, scoped to their own expenses
    Funcionario,
}

impl Role {
    /// Parses a role from its wire representation
    ///
    /// Anything outside the closed set fails with
    /// [`WorkflowError::InvalidRole`]. This is the only place a malformed
    /// role can surface; inside the core the enum makes it unrepresentable.
    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "admin" => Ok(Role::Admin),
            "financeiro" => Ok(Role::Financeiro),
            "gestao" => Ok(Role::Gestao),
            "funcionario" => Ok(Role::Funcionario),
            other => Err(WorkflowError::InvalidRole(other.to_string())),
        }
    }

    /// Whether this role participates in expense review
    pub fn is_reviewer(&self) -> bool {
        !matches!(self, Role::Funcionario)
    }

    /// Department-bound roles must carry a department
    pub fn requires_department(&self) -> bool {
        matches!(self, Role::Gestao | Role::Funcionario)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Financeiro => write!(f, "financeiro"),
            Role::Gestao => write!(f, "gestao"),
            Role::Funcionario => write!(f, "funcionario"),
        }
    }
}

/// Email value object representing a valid email address
///
/// # Invariants
/// - Must contain '@' character
/// - Must be at least 3 characters long
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use expensetrack_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("test@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "test@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, WorkflowError> {
        let email = email.into();
        if email.contains('@') && email.len() >= 3 {
            Ok(Email(email))
        } else {
            Err(WorkflowError::Validation(format!("invalid email: {}", email)))
        }
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
