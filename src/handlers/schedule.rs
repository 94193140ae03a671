// handlers/schedule.rs - village calendar, not linked to projects

use axum::extract::State;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::fields::{optional_text, required, required_text};
use crate::api::ApiJson;
use crate::database::models::{NewScheduleItem, ScheduleItem};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// GET /api/schedule - soonest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ScheduleItem>> {
    Ok(ApiResponse::success(state.store.list_schedule().await?))
}

/// POST /api/schedule
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateScheduleRequest>,
) -> ApiResult<ScheduleItem> {
    let item = state
        .store
        .insert_schedule_item(NewScheduleItem {
            title: required_text("title", req.title)?,
            description: optional_text(req.description),
            due_date: required("due_date", req.due_date)?,
        })
        .await?;

    tracing::info!(schedule_id = item.schedule_id, "Created schedule item");
    Ok(ApiResponse::created(item))
}
