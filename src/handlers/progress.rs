// handlers/progress.rs - progress reports and villager feedback

use axum::{extract::State, Extension};
use serde::Deserialize;

use crate::api::fields::{optional_text, required, required_text};
use crate::api::{ApiJson, ApiPath};
use crate::database::models::{NewFeedback, NewProgressUpdate, ProgressFeedback, ProgressUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub notes: Option<String>,
    pub completion_percentage: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub comment_text: Option<String>,
}

/// POST /api/projects/:id/progress
pub async fn record_progress(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(req): ApiJson<ProgressRequest>,
) -> ApiResult<ProgressUpdate> {
    let completion_percentage = required("completion_percentage", req.completion_percentage)?;
    if !(0..=100).contains(&completion_percentage) {
        return Err(ApiError::invalid_field(
            "completion_percentage",
            "must be between 0 and 100",
        ));
    }

    let update = state
        .store
        .insert_progress(NewProgressUpdate {
            project_id,
            notes: optional_text(req.notes),
            completion_percentage,
            created_by: Some(auth.user_id),
        })
        .await?;

    tracing::info!(project_id, completion_percentage, "Recorded progress");
    Ok(ApiResponse::created(update))
}

/// POST /api/projects/:id/feedback
pub async fn record_feedback(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(req): ApiJson<FeedbackRequest>,
) -> ApiResult<ProgressFeedback> {
    let feedback = state
        .store
        .insert_feedback(NewFeedback {
            project_id,
            comment_text: required_text("comment_text", req.comment_text)?,
            created_by: Some(auth.user_id),
        })
        .await?;

    tracing::info!(project_id, feedback_id = feedback.feedback_id, "Recorded feedback");
    Ok(ApiResponse::created(feedback))
}
