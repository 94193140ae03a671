use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Official's progress report on a project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressUpdate {
    pub progress_id: i64,
    pub project_id: i64,
    pub notes: Option<String>,
    pub completion_percentage: i32,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProgressUpdate {
    pub project_id: i64,
    pub notes: Option<String>,
    pub completion_percentage: i32,
    pub created_by: Option<i64>,
}

/// Villager's comment on a project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressFeedback {
    pub feedback_id: i64,
    pub project_id: i64,
    pub comment_text: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub project_id: i64,
    pub comment_text: String,
    pub created_by: Option<i64>,
}
