use serde::{Deserialize, Serialize};

/// Represents the review status of an expense claim
///
/// # Status Transitions
/// ```text
/// Pending -> Approved
///      `---> Rejected
/// ```
///
/// `Approved` and `Rejected` are terminal; resubmission means creating a new
/// expense, never mutating the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Awaiting a reviewer decision
    Pending,
    /// Accepted by a reviewer
    Approved,
    /// Declined by a reviewer, with a mandatory comment
    Rejected,
}

impl ExpenseStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Example
    /// ```
    /// use expensetrack_api::domain::expense::value_objects::ExpenseStatus;
    ///
    /// assert!(ExpenseStatus::Pending.can_transition_to(ExpenseStatus::Approved));
    /// assert!(!ExpenseStatus::Approved.can_transition_to(ExpenseStatus::Rejected));
    /// ```
    pub fn can_transition_to(&self, next: ExpenseStatus) -> bool {
        use ExpenseStatus::*;
        matches!((self, next), (Pending, Approved) | (Pending, Rejected))
    }

    /// Whether no further transition is possible from this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExpenseStatus::Pending)
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseStatus::Pending => write!(f, "pending"),
            ExpenseStatus::Approved => write!(f, "approved"),
            ExpenseStatus::Rejected => write!(f, "rejected"),
        }
    }
}
