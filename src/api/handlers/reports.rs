use std::collections::BTreeMap;

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::current_user;
use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::api::state::AppState;
use crate::domain::reports::{self, Summary};
use crate::domain::policy;

/// Aggregate report over the caller's visible expenses
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: Summary,
    pub by_department: BTreeMap<String, Decimal>,
    pub by_employee: BTreeMap<Uuid, Decimal>,
}

/// Summary totals plus per-department and per-employee breakdowns
///
/// GET /api/reports/summary
pub async fn expense_summary(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
) -> Result<Json<SummaryResponse>, ApiError> {
    let user = current_user(&state, user_id).await?;

    // Reports are a reviewer surface; employees track their claims on the
    // expense list instead
    if !user.role().is_reviewer() {
        return Err(ApiError::forbidden("No access to expense reports"));
    }

    let all = state.expenses.list_all().await?;
    let visible = policy::visible_expenses(&user, &all);

    Ok(Json(SummaryResponse {
        summary: reports::summarize(&visible),
        by_department: reports::totals_by_department(&visible),
        by_employee: reports::totals_by_employee(&visible),
    }))
}
