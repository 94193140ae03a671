// handlers/documents.rs - project files: bytes to object storage, metadata to the store

use axum::extract::{multipart::MultipartRejection, Multipart, State};

use crate::api::fields::optional_text;
use crate::api::ApiPath;
use crate::database::models::{NewDocument, ProjectDocument};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::storage::{object_path, sanitize_file_name};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// GET /api/projects/:id/documents
pub async fn list(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> ApiResult<Vec<ProjectDocument>> {
    Ok(ApiResponse::success(state.store.list_documents(project_id).await?))
}

/// POST /api/projects/:id/documents - multipart `file` plus optional `document_type`.
///
/// The object key is `<project_id>/<file name>`; re-uploading the same name
/// replaces the stored bytes and adds another metadata row.
pub async fn upload(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ProjectDocument> {
    let mut multipart = multipart.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut file: Option<UploadedFile> = None;
    let mut document_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "document_type" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                document_type = optional_text(Some(text));
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("File is required."))?;
    let file_name = sanitize_file_name(&file.file_name)
        .ok_or_else(|| ApiError::invalid_field("file", "must have a file name"))?;
    let file_path = object_path(project_id, &file_name);

    // Nothing reaches the bucket for a project that has no row to point back at it
    if state.store.find_project(project_id).await?.is_none() {
        return Err(ApiError::not_found("Project not found"));
    }

    state
        .storage
        .upload(&file_path, file.bytes, &file.content_type)
        .await?;

    let document = state
        .store
        .insert_document(NewDocument {
            project_id,
            file_name,
            file_path,
            document_type,
        })
        .await?;

    tracing::info!(
        project_id,
        document_id = document.document_id,
        path = %document.file_path,
        "Stored project document"
    );
    Ok(ApiResponse::created(document))
}
