use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::WorkflowError;
use crate::domain::expense::value_objects::ExpenseStatus;
use crate::domain::expense::Expense;
use crate::domain::repositories::ExpenseRepository;

/// PostgreSQL implementation of ExpenseRepository
///
/// Reviewer transitions are serialized per id by a conditional UPDATE on the
/// stored status, so two racing reviewers can never both land.
pub struct PostgresExpenseRepository {
    pool: PgPool,
}

impl PostgresExpenseRepository {
    /// Creates a new PostgresExpenseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ExpenseRow {
    id: Uuid,
    user_id: Uuid,
    user_name: String,
    department: String,
    description: String,
    amount: Decimal,
    expense_date: NaiveDate,
    status: ExpenseStatus,
    approved_by: Option<String>,
    comments: Option<String>,
    receipt_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ExpenseRow> for Expense {
    fn from(r: ExpenseRow) -> Self {
        Expense::from_persistence(
            r.id,
            r.user_id,
            r.user_name,
            r.department,
            r.description,
            r.amount,
            r.expense_date,
            r.status,
            r.approved_by,
            r.comments,
            r.receipt_url,
            r.created_at,
        )
    }
}

const EXPENSE_COLUMNS: &str = "id, user_id, user_name, department, description, amount, \
     expense_date, status, approved_by, comments, receipt_url, created_at";

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    async fn save(&self, expense: &Expense) -> Result<(), WorkflowError> {
        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, user_id, user_name, department, description, amount,
                expense_date, status, approved_by, comments, receipt_url, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                description = EXCLUDED.description,
                amount = EXCLUDED.amount,
                expense_date = EXCLUDED.expense_date,
                status = EXCLUDED.status,
                approved_by = EXCLUDED.approved_by,
                comments = EXCLUDED.comments,
                receipt_url = EXCLUDED.receipt_url
            "#,
        )
        .bind(expense.id())
        .bind(expense.user_id())
        .bind(expense.user_name())
        .bind(expense.department())
        .bind(expense.description())
        .bind(expense.amount())
        .bind(expense.date())
        .bind(expense.status())
        .bind(expense.approved_by())
        .bind(expense.comments())
        .bind(expense.receipt_url())
        .bind(expense.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| WorkflowError::Storage(format!("failed to save expense: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, WorkflowError> {
        let row = sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {} FROM expenses WHERE id = $1",
            EXPENSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WorkflowError::Storage(format!("failed to find expense by id: {}", e)))?;

        Ok(row.map(Expense::from))
    }

    async fn list_all(&self) -> Result<Vec<Expense>, WorkflowError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {} FROM expenses ORDER BY created_at DESC",
            EXPENSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| WorkflowError::Storage(format!("failed to list expenses: {}", e)))?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn complete_review(&self, expense: &Expense) -> Result<(), WorkflowError> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET status = $2, approved_by = $3, comments = $4
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(expense.id())
        .bind(expense.status())
        .bind(expense.approved_by())
        .bind(expense.comments())
        .execute(&self.pool)
        .await
        .map_err(|e| WorkflowError::Storage(format!("failed to complete review: {}", e)))?;

        if result.rows_affected() == 0 {
            // Lost the race, or the record is gone
            return match self.find_by_id(expense.id()).await? {
                Some(_) => Err(WorkflowError::Conflict(
                    "expense was already reviewed".to_string(),
                )),
                None => Err(WorkflowError::NotFound(expense.id())),
            };
        }

        Ok(())
    }
}
