// handlers/metrics.rs - GET /api/metrics/projects-by-month

use axum::extract::State;
use std::collections::BTreeMap;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{projects_by_month as bucket_by_month, MonthlyMetrics};
use crate::state::AppState;

pub async fn projects_by_month(
    State(state): State<AppState>,
) -> ApiResult<BTreeMap<String, MonthlyMetrics>> {
    let (projects, expenses) = futures::try_join!(
        state.store.list_projects(),
        state.store.list_expenses(None)
    )?;

    Ok(ApiResponse::success(bucket_by_month(&projects, &expenses)))
}
