// handlers/funds.rs - disbursements in, expenses out

use axum::extract::State;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::fields::{optional_text, positive_amount, required};
use crate::api::{ApiJson, ApiPath};
use crate::database::models::{Expense, FundDisbursement, NewDisbursement, NewExpense};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{funds_summary, FundsSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DisbursementRequest {
    pub amount: Option<Decimal>,
    pub date_received: Option<NaiveDate>,
    pub phase: Option<String>,
    pub source_of_fund: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    pub description: Option<String>,
    pub amount_spent: Option<Decimal>,
    pub date_spent: Option<NaiveDate>,
}

/// GET /api/funds - totals across all projects
pub async fn summary(State(state): State<AppState>) -> ApiResult<FundsSummary> {
    Ok(ApiResponse::success(funds_summary(state.store.as_ref()).await?))
}

/// GET /api/funds/distribution - every disbursement, most recent first
pub async fn distribution(State(state): State<AppState>) -> ApiResult<Vec<FundDisbursement>> {
    Ok(ApiResponse::success(state.store.list_disbursements(None).await?))
}

/// GET /api/projects/:id/disbursements
pub async fn list_disbursements(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<Vec<FundDisbursement>> {
    Ok(ApiResponse::success(
        state.store.list_disbursements(Some(project_id)).await?,
    ))
}

/// POST /api/projects/:id/disbursements
pub async fn create_disbursement(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(req): ApiJson<DisbursementRequest>,
) -> ApiResult<FundDisbursement> {
    let disbursement = state
        .store
        .insert_disbursement(NewDisbursement {
            project_id,
            amount: positive_amount("amount", req.amount)?,
            date_received: required("date_received", req.date_received)?,
            phase: optional_text(req.phase),
            source_of_fund: optional_text(req.source_of_fund),
        })
        .await?;

    tracing::info!(
        project_id,
        disbursement_id = disbursement.disbursement_id,
        amount = %disbursement.amount,
        "Recorded disbursement"
    );
    Ok(ApiResponse::created(disbursement))
}

/// GET /api/projects/:id/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<Vec<Expense>> {
    Ok(ApiResponse::success(
        state.store.list_expenses(Some(project_id)).await?,
    ))
}

/// POST /api/projects/:id/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(req): ApiJson<ExpenseRequest>,
) -> ApiResult<Expense> {
    let expense = state
        .store
        .insert_expense(NewExpense {
            project_id,
            description: optional_text(req.description),
            amount_spent: positive_amount("amount_spent", req.amount_spent)?,
            date_spent: required("date_spent", req.date_spent)?,
        })
        .await?;

    tracing::info!(
        project_id,
        expense_id = expense.expense_id,
        amount = %expense.amount_spent,
        "Recorded expense"
    );
    Ok(ApiResponse::created(expense))
}
