// handlers/projects.rs - project records, status changes and ranking

use axum::{extract::State, Extension};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::fields::{non_negative_amount, optional_text, priority_list, required_text};
use crate::api::{ApiJson, ApiPath};
use crate::database::models::{NewProject, Project};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub estimated_budget: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriorityResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/projects - new projects start as drafts with no priority
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> ApiResult<Project> {
    let title = required_text("title", req.title)?;
    let estimated_budget = non_negative_amount(
        "estimated_budget",
        req.estimated_budget.unwrap_or(Decimal::ZERO),
    )?;

    let project = state
        .store
        .insert_project(NewProject {
            title,
            description: optional_text(req.description),
            location: optional_text(req.location),
            estimated_budget,
            created_by: Some(auth.user_id),
        })
        .await?;

    tracing::info!(
        project_id = project.project_id,
        created_by = auth.user_id,
        role = %auth.role,
        "Created project"
    );
    Ok(ApiResponse::created(project))
}

/// GET /api/projects - ranked projects first, then newest
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    Ok(ApiResponse::success(state.store.list_projects().await?))
}

/// GET /api/projects/:id
pub async fn get(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<Project> {
    let project = state
        .store
        .find_project(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(ApiResponse::success(project))
}

/// PUT /api/projects/:id/status - overwrite the status, any value accepted
pub async fn update_status(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(req): ApiJson<StatusRequest>,
) -> ApiResult<Project> {
    let status = required_text("status", req.status)?;

    let project = state
        .store
        .update_project_status(project_id, &status)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    tracing::info!(project_id, status = %project.status, "Updated project status");
    Ok(ApiResponse::success(project))
}

/// PUT /api/projects/priority - rank the listed projects 1..n, unranking the rest
pub async fn set_priority(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<PriorityResponse> {
    let project_ids = priority_list(body.get("priority_list"))?;

    state.store.set_priority_order(&project_ids).await?;

    tracing::info!(count = project_ids.len(), "Reprioritized projects");
    Ok(ApiResponse::success(PriorityResponse {
        success: true,
        message: format!("Prioritized {} projects.", project_ids.len()),
    }))
}
