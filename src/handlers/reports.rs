// handlers/reports.rs - GET /api/projects/:id/reports/lpj

use axum::extract::State;

use crate::api::ApiPath;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{generate_lpj, LpjReport};
use crate::state::AppState;

pub async fn lpj(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<LpjReport> {
    Ok(ApiResponse::success(
        generate_lpj(state.store.as_ref(), project_id).await?,
    ))
}
