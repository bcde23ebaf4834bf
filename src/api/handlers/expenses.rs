use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_user;
use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::api::state::AppState;
use crate::domain::expense::{Expense, ExpenseStatus, NewExpense};
use crate::domain::policy;

/// Request body for submitting an expense claim
#[derive(Debug, Deserialize)]
pub struct SubmitExpenseRequest {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub receipt_url: Option<String>,
}

/// Request body for approving an expense
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub comment: Option<String>,
}

/// Request body for rejecting an expense
///
/// The comment field is optional at the wire level so a missing comment
/// reaches the domain and fails validation there, not in deserialization.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub comment: Option<String>,
}

/// Expense representation returned to clients
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub department: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: ExpenseStatus,
    pub approved_by: Option<String>,
    pub comments: Option<String>,
    pub receipt_url: Option<String>,
}

impl From<&Expense> for ExpenseResponse {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id(),
            user_id: expense.user_id(),
            user_name: expense.user_name().to_string(),
            department: expense.department().to_string(),
            description: expense.description().to_string(),
            amount: expense.amount(),
            date: expense.date(),
            status: expense.status(),
            approved_by: expense.approved_by().map(str::to_string),
            comments: expense.comments().map(str::to_string),
            receipt_url: expense.receipt_url().map(str::to_string),
        }
    }
}

/// Submit a new expense claim
///
/// POST /api/expenses
pub async fn submit_expense(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    Json(req): Json<SubmitExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    let user = current_user(&state, user_id).await?;

    let (expense, _events) = Expense::submit(
        &user,
        NewExpense {
            description: req.description,
            amount: req.amount,
            date: req.date,
            receipt_url: req.receipt_url,
        },
    )?;

    state.expenses.save(&expense).await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(&expense))))
}

/// List the expenses visible to the caller
///
/// GET /api/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let user = current_user(&state, user_id).await?;
    let all = state.expenses.list_all().await?;

    let responses = policy::visible_expenses(&user, &all)
        .into_iter()
        .map(ExpenseResponse::from)
        .collect();

    Ok(Json(responses))
}

/// List the pending expenses awaiting the caller's review
///
/// GET /api/expenses/pending
pub async fn pending_expenses(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let user = current_user(&state, user_id).await?;
    let all = state.expenses.list_all().await?;

    let responses = policy::approval_queue(&user, &all)?
        .into_iter()
        .map(ExpenseResponse::from)
        .collect();

    Ok(Json(responses))
}

/// Approve a pending expense
///
/// POST /api/expenses/:id/approve
pub async fn approve_expense(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let reviewer = current_user(&state, user_id).await?;

    let mut expense = state
        .expenses
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Expense not found: {}", id)))?;

    expense.approve(&reviewer, req.comment)?;
    state.expenses.complete_review(&expense).await?;

    Ok(Json(ExpenseResponse::from(&expense)))
}

/// Reject a pending expense
///
/// POST /api/expenses/:id/reject
pub async fn reject_expense(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let reviewer = current_user(&state, user_id).await?;

    let mut expense = state
        .expenses
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Expense not found: {}", id)))?;

    expense.reject(&reviewer, req.comment.as_deref().unwrap_or(""))?;
    state.expenses.complete_review(&expense).await?;

    Ok(Json(ExpenseResponse::from(&expense)))
}
