use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metadata for a file kept in object storage
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectDocument {
    pub document_id: i64,
    pub project_id: i64,
    pub file_name: String,
    /// Object key inside the documents bucket
    pub file_path: String,
    pub document_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub project_id: i64,
    pub file_name: String,
    pub file_path: String,
    pub document_type: Option<String>,
}
