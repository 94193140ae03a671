use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Expense, FundDisbursement, NewDisbursement, NewDocument, NewExpense, NewFeedback,
    NewProgressUpdate, NewProject, NewScheduleItem, NewUser, ProgressFeedback, ProgressUpdate,
    Project, ProjectDocument, ScheduleItem, User,
};

/// Persistence boundary for every table the API touches.
///
/// Implementations own constraint enforcement: unique emails, and project
/// references on disbursements, expenses, progress, feedback and documents.
/// Listing order is part of the contract:
/// - projects: priority ascending with nulls last, then newest first
/// - schedule: due date ascending
/// - disbursements / expenses: date received / spent descending
/// - progress, feedback, documents: oldest first
#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip to the backing database
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Release pooled connections
    async fn close(&self) {}

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, DatabaseError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn insert_project(&self, project: NewProject) -> Result<Project, DatabaseError>;
    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError>;
    async fn find_project(&self, project_id: i64) -> Result<Option<Project>, DatabaseError>;
    async fn update_project_status(
        &self,
        project_id: i64,
        status: &str,
    ) -> Result<Option<Project>, DatabaseError>;

    /// Clear every priority, then rank `project_ids` 1..n in order.
    ///
    /// Atomic: an unknown id fails with `NotFound` and leaves the previous
    /// ranking untouched.
    async fn set_priority_order(&self, project_ids: &[i64]) -> Result<(), DatabaseError>;

    async fn list_schedule(&self) -> Result<Vec<ScheduleItem>, DatabaseError>;
    async fn insert_schedule_item(
        &self,
        item: NewScheduleItem,
    ) -> Result<ScheduleItem, DatabaseError>;

    /// All disbursements when `project_id` is `None`
    async fn list_disbursements(
        &self,
        project_id: Option<i64>,
    ) -> Result<Vec<FundDisbursement>, DatabaseError>;
    async fn insert_disbursement(
        &self,
        disbursement: NewDisbursement,
    ) -> Result<FundDisbursement, DatabaseError>;

    /// All expenses when `project_id` is `None`
    async fn list_expenses(&self, project_id: Option<i64>) -> Result<Vec<Expense>, DatabaseError>;
    async fn insert_expense(&self, expense: NewExpense) -> Result<Expense, DatabaseError>;

    async fn list_progress(&self, project_id: i64) -> Result<Vec<ProgressUpdate>, DatabaseError>;
    async fn insert_progress(
        &self,
        update: NewProgressUpdate,
    ) -> Result<ProgressUpdate, DatabaseError>;

    async fn list_feedback(&self, project_id: i64)
        -> Result<Vec<ProgressFeedback>, DatabaseError>;
    async fn insert_feedback(
        &self,
        feedback: NewFeedback,
    ) -> Result<ProgressFeedback, DatabaseError>;

    async fn list_documents(&self, project_id: i64)
        -> Result<Vec<ProjectDocument>, DatabaseError>;
    async fn insert_document(
        &self,
        document: NewDocument,
    ) -> Result<ProjectDocument, DatabaseError>;
}
