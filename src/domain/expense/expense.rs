use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::events::ExpenseEvent;
use super::value_objects::ExpenseStatus;
use crate::domain::errors::WorkflowError;
use crate::domain::policy;
use crate::domain::user::{Role, User};

/// Draft data for a new expense claim
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub receipt_url: Option<String>,
}

/// Expense aggregate root
///
/// Represents a single reimbursement claim and enforces every rule of its
/// lifecycle: claims are born `Pending`, are mutated exactly once by a
/// reviewer transition, and are never deleted.
///
/// # Invariants
/// - Description cannot be empty
/// - Amount is never negative
/// - Submitter info (`user_id`, `user_name`, `department`) is copied from
///   the owning user at creation and never changes
/// - `approved_by` is only set by a transition out of `Pending`
/// - A rejection always carries a comment
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use expensetrack_api::domain::expense::{Expense, NewExpense};
/// use expensetrack_api::domain::expense::value_objects::ExpenseStatus;
/// use expensetrack_api::domain::user::{Email, Role, User};
///
/// let employee = User::new(
///     "Employee".to_string(),
///     Email::new("employee@example.com").unwrap(),
///     "hash".to_string(),
///     Role::Funcionario,
///     Some("Marketing".to_string()),
/// )
/// .expect("valid user");
///
/// let (expense, events) = Expense::submit(
///     &employee,
///     NewExpense {
///         description: "Taxi to client meeting".to_string(),
///         amount: Decimal::new(4500, 2),
///         date: NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
///         receipt_url: None,
///     },
/// )
/// .expect("valid expense");
///
/// assert_eq!(expense.status(), ExpenseStatus::Pending);
/// assert!(!events.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Expense {
    id: Uuid,
    user_id: Uuid,
    user_name: String,
    department: String,
    description: String,
    amount: Decimal,
    date: NaiveDate,
    status: ExpenseStatus,
    approved_by: Option<String>,
    comments: Option<String>,
    receipt_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl Expense {
    /// Submits a new expense claim
    ///
    /// # Business Rules Enforced
    /// - Finance users do not submit claims
    /// - Description must not be empty
    /// - Amount must not be negative
    /// - The submitter must belong to a department
    /// - Initial status is always `Pending`
    ///
    /// # Returns
    /// * `Ok((Expense, Vec<ExpenseEvent>))` - New claim and events generated
    /// * `Err(WorkflowError)` - If any rule is violated
    pub fn submit(
        submitter: &User,
        draft: NewExpense,
    ) -> Result<(Self, Vec<ExpenseEvent>), WorkflowError> {
        if submitter.role() == Role::Financeiro {
            return Err(WorkflowError::Forbidden(
                "finance users do not submit expense claims".to_string(),
            ));
        }

        let description = draft.description.trim().to_string();
        if description.is_empty() {
            return Err(WorkflowError::Validation(
                "description cannot be empty".to_string(),
            ));
        }

        if draft.amount < Decimal::ZERO {
            return Err(WorkflowError::Validation(
                "amount cannot be negative".to_string(),
            ));
        }

        let department = submitter.department().ok_or_else(|| {
            WorkflowError::Validation("submitter does not belong to a department".to_string())
        })?;

        let expense = Self {
            id: Uuid::new_v4(),
            user_id: submitter.id(),
            user_name: submitter.name().to_string(),
            department: department.to_string(),
            description,
            amount: draft.amount,
            date: draft.date,
            status: ExpenseStatus::Pending,
            approved_by: None,
            comments: None,
            receipt_url: draft.receipt_url,
            created_at: Utc::now(),
        };

        let events = vec![ExpenseEvent::Submitted {
            expense_id: expense.id,
            user_id: expense.user_id,
            amount: expense.amount,
        }];

        Ok((expense, events))
    }

    /// Approves a pending claim
    ///
    /// # Business Rules
    /// - The reviewer must hold review scope over this claim's department
    /// - Only a `Pending` claim can be approved
    /// - A blank comment is treated as absent
    ///
    /// # Returns
    /// * `Ok(ExpenseEvent)` - Approved event generated
    /// * `Err(WorkflowError::Forbidden)` - Reviewer lacks scope
    /// * `Err(WorkflowError::Conflict)` - Claim is no longer pending
    pub fn approve(
        &mut self,
        reviewer: &User,
        comment: Option<String>,
    ) -> Result<ExpenseEvent, WorkflowError> {
        if !policy::can_review(reviewer, &self.department) {
            return Err(WorkflowError::Forbidden(format!(
                "no review scope over the {} department",
                self.department
            )));
        }

        let next = ExpenseStatus::Approved;
        if !self.status.can_transition_to(next) {
            return Err(WorkflowError::Conflict(format!(
                "expense is already {}",
                self.status
            )));
        }

        self.status = next;
        self.approved_by = Some(reviewer.name().to_string());
        self.comments = comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());

        Ok(ExpenseEvent::Approved {
            expense_id: self.id,
            reviewed_by: reviewer.name().to_string(),
        })
    }

    /// Rejects a pending claim
    ///
    /// Same scope and status rules as [`Expense::approve`], but the comment
    /// is mandatory.
    ///
    /// # Returns
    /// * `Ok(ExpenseEvent)` - Rejected event generated
    /// * `Err(WorkflowError::Validation)` - Comment is missing or blank
    /// * `Err(WorkflowError::Forbidden)` - Reviewer lacks scope
    /// * `Err(WorkflowError::Conflict)` - Claim is no longer pending
    pub fn reject(&mut self, reviewer: &User, comment: &str) -> Result<ExpenseEvent, WorkflowError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(WorkflowError::Validation(
                "a comment is required when rejecting an expense".to_string(),
            ));
        }

        if !policy::can_review(reviewer, &self.department) {
            return Err(WorkflowError::Forbidden(format!(
                "no review scope over the {} department",
                self.department
            )));
        }

        let next = ExpenseStatus::Rejected;
        if !self.status.can_transition_to(next) {
            return Err(WorkflowError::Conflict(format!(
                "expense is already {}",
                self.status
            )));
        }

        self.status = next;
        self.approved_by = Some(reviewer.name().to_string());
        self.comments = Some(comment.to_string());

        Ok(ExpenseEvent::Rejected {
            expense_id: self.id,
            reviewed_by: reviewer.name().to_string(),
            reason: comment.to_string(),
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> ExpenseStatus {
        self.status
    }

    pub fn approved_by(&self) -> Option<&str> {
        self.approved_by.as_deref()
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn receipt_url(&self) -> Option<&str> {
        self.receipt_url.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs an Expense from persistence layer data
    ///
    /// Bypasses business rules validation since the data is already
    /// validated and stored. Only to be used by repository implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        user_id: Uuid,
        user_name: String,
        department: String,
        description: String,
        amount: Decimal,
        date: NaiveDate,
        status: ExpenseStatus,
        approved_by: Option<String>,
        comments: Option<String>,
        receipt_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            department,
            description,
            amount,
            date,
            status,
            approved_by,
            comments,
            receipt_url,
            created_at,
        }
    }
}
