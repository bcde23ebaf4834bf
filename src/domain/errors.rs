use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the expense workflow core
///
/// Every operation returns one of these variants instead of degrading to a
/// default value. The HTTP layer translates them to status codes; the core
/// never renders user-facing copy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("record not found: {0}")]
    NotFound(Uuid),

    #[error("unrecognized role: {0}")]
    InvalidRole(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
