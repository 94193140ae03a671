use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status every project starts in
pub const DRAFT_STATUS: &str = "draft";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub estimated_budget: Decimal,
    pub status: String,
    /// Rank among prioritized projects, 1 is highest
    pub priority: Option<i32>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub estimated_budget: Decimal,
    pub created_by: Option<i64>,
}
