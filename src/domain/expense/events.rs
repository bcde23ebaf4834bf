use rust_decimal::Decimal;
use uuid::Uuid;

/// Domain events that occur within the Expense aggregate
///
/// Each successful mutation emits one of these. Callers may publish them to
/// external systems or simply discard them.
#[derive(Debug, Clone)]
pub enum ExpenseEvent {
    /// Fired when an employee submits a new claim
    Submitted {
        /// ID of the new expense
        expense_id: Uuid,
        /// Submitting user
        user_id: Uuid,
        /// Claimed amount
        amount: Decimal,
    },
    /// Fired when a reviewer approves a pending claim
    Approved {
        /// ID of the approved expense
        expense_id: Uuid,
        /// Name of the reviewer
        reviewed_by: String,
    },
    /// Fired when a reviewer rejects a pending claim
    Rejected {
        /// ID of the rejected expense
        expense_id: Uuid,
        /// Name of the reviewer
        reviewed_by: String,
        /// Mandatory rejection comment
        reason: String,
    },
}

impl ExpenseEvent {
    /// Returns the expense_id for this event
    pub fn expense_id(&self) -> Uuid {
        match self {
            ExpenseEvent::Submitted { expense_id, .. } => *expense_id,
            ExpenseEvent::Approved { expense_id, .. } => *expense_id,
            ExpenseEvent::Rejected { expense_id, .. } => *expense_id,
        }
    }
}
