use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Expense, FundDisbursement, NewDisbursement, NewDocument, NewExpense, NewFeedback,
    NewProgressUpdate, NewProject, NewScheduleItem, NewUser, ProgressFeedback, ProgressUpdate,
    Project, ProjectDocument, ScheduleItem, User, DRAFT_STATUS,
};
use crate::database::store::Store;

const USER_COLUMNS: &str = "user_id, name, email, password_hash, role, created_at";
const PROJECT_COLUMNS: &str = "project_id, title, description, location, estimated_budget, \
     status, priority, created_by, created_at";
const SCHEDULE_COLUMNS: &str = "schedule_id, title, description, due_date, created_at";
const DISBURSEMENT_COLUMNS: &str =
    "disbursement_id, project_id, amount, date_received, phase, source_of_fund, created_at";
const EXPENSE_COLUMNS: &str =
    "expense_id, project_id, description, amount_spent, date_spent, created_at";
const PROGRESS_COLUMNS: &str =
    "progress_id, project_id, notes, completion_percentage, created_by, created_at";
const FEEDBACK_COLUMNS: &str = "feedback_id, project_id, comment_text, created_by, created_at";
const DOCUMENT_COLUMNS: &str =
    "document_id, project_id, file_name, file_path, document_type, created_at";

/// Store backed by a pooled Postgres connection
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("Closed database pool");
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE user_id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, DatabaseError> {
        let sql = format!(
            "INSERT INTO projects (title, description, location, estimated_budget, status, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            PROJECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Project>(&sql)
            .bind(project.title)
            .bind(project.description)
            .bind(project.location)
            .bind(project.estimated_budget)
            .bind(DRAFT_STATUS)
            .bind(project.created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM projects ORDER BY priority ASC NULLS LAST, created_at DESC, project_id DESC",
            PROJECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Project>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_project(&self, project_id: i64) -> Result<Option<Project>, DatabaseError> {
        let sql = format!("SELECT {} FROM projects WHERE project_id = $1", PROJECT_COLUMNS);
        let row = sqlx::query_as::<_, Project>(&sql)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_project_status(
        &self,
        project_id: i64,
        status: &str,
    ) -> Result<Option<Project>, DatabaseError> {
        let sql = format!(
            "UPDATE projects SET status = $2 WHERE project_id = $1 RETURNING {}",
            PROJECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Project>(&sql)
            .bind(project_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn set_priority_order(&self, project_ids: &[i64]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE projects SET priority = NULL WHERE priority IS NOT NULL")
            .execute(&mut *tx)
            .await?;

        // One statement ranks every id by its position in the input array
        let ranked = sqlx::query(
            "UPDATE projects AS p SET priority = t.position::int \
             FROM unnest($1::bigint[]) WITH ORDINALITY AS t(id, position) \
             WHERE p.project_id = t.id",
        )
        .bind(project_ids.to_vec())
        .execute(&mut *tx)
        .await?;

        if ranked.rows_affected() != project_ids.len() as u64 {
            let existing: Vec<i64> =
                sqlx::query_scalar("SELECT project_id FROM projects WHERE project_id = ANY($1)")
                    .bind(project_ids.to_vec())
                    .fetch_all(&mut *tx)
                    .await?;
            tx.rollback().await?;

            let missing = project_ids
                .iter()
                .find(|id| !existing.contains(*id))
                .copied()
                .unwrap_or_default();
            return Err(DatabaseError::NotFound(format!(
                "Project {} not found",
                missing
            )));
        }

        tx.commit().await?;
        debug!(count = project_ids.len(), "Priorities reassigned");
        Ok(())
    }

    async fn list_schedule(&self) -> Result<Vec<ScheduleItem>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM schedule_items ORDER BY due_date ASC, schedule_id ASC",
            SCHEDULE_COLUMNS
        );
        let rows = sqlx::query_as::<_, ScheduleItem>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_schedule_item(
        &self,
        item: NewScheduleItem,
    ) -> Result<ScheduleItem, DatabaseError> {
        let sql = format!(
            "INSERT INTO schedule_items (title, description, due_date) VALUES ($1, $2, $3) RETURNING {}",
            SCHEDULE_COLUMNS
        );
        let row = sqlx::query_as::<_, ScheduleItem>(&sql)
            .bind(item.title)
            .bind(item.description)
            .bind(item.due_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_disbursements(
        &self,
        project_id: Option<i64>,
    ) -> Result<Vec<FundDisbursement>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM fund_disbursements \
             WHERE ($1::bigint IS NULL OR project_id = $1) \
             ORDER BY date_received DESC, disbursement_id DESC",
            DISBURSEMENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, FundDisbursement>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_disbursement(
        &self,
        disbursement: NewDisbursement,
    ) -> Result<FundDisbursement, DatabaseError> {
        let sql = format!(
            "INSERT INTO fund_disbursements (project_id, amount, date_received, phase, source_of_fund) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            DISBURSEMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, FundDisbursement>(&sql)
            .bind(disbursement.project_id)
            .bind(disbursement.amount)
            .bind(disbursement.date_received)
            .bind(disbursement.phase)
            .bind(disbursement.source_of_fund)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_expenses(&self, project_id: Option<i64>) -> Result<Vec<Expense>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM expenses \
             WHERE ($1::bigint IS NULL OR project_id = $1) \
             ORDER BY date_spent DESC, expense_id DESC",
            EXPENSE_COLUMNS
        );
        let rows = sqlx::query_as::<_, Expense>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_expense(&self, expense: NewExpense) -> Result<Expense, DatabaseError> {
        let sql = format!(
            "INSERT INTO expenses (project_id, description, amount_spent, date_spent) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            EXPENSE_COLUMNS
        );
        let row = sqlx::query_as::<_, Expense>(&sql)
            .bind(expense.project_id)
            .bind(expense.description)
            .bind(expense.amount_spent)
            .bind(expense.date_spent)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_progress(&self, project_id: i64) -> Result<Vec<ProgressUpdate>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM progress_updates WHERE project_id = $1 ORDER BY created_at ASC, progress_id ASC",
            PROGRESS_COLUMNS
        );
        let rows = sqlx::query_as::<_, ProgressUpdate>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_progress(
        &self,
        update: NewProgressUpdate,
    ) -> Result<ProgressUpdate, DatabaseError> {
        let sql = format!(
            "INSERT INTO progress_updates (project_id, notes, completion_percentage, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            PROGRESS_COLUMNS
        );
        let row = sqlx::query_as::<_, ProgressUpdate>(&sql)
            .bind(update.project_id)
            .bind(update.notes)
            .bind(update.completion_percentage)
            .bind(update.created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_feedback(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProgressFeedback>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM progress_feedback WHERE project_id = $1 ORDER BY created_at ASC, feedback_id ASC",
            FEEDBACK_COLUMNS
        );
        let rows = sqlx::query_as::<_, ProgressFeedback>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_feedback(
        &self,
        feedback: NewFeedback,
    ) -> Result<ProgressFeedback, DatabaseError> {
        let sql = format!(
            "INSERT INTO progress_feedback (project_id, comment_text, created_by) \
             VALUES ($1, $2, $3) RETURNING {}",
            FEEDBACK_COLUMNS
        );
        let row = sqlx::query_as::<_, ProgressFeedback>(&sql)
            .bind(feedback.project_id)
            .bind(feedback.comment_text)
            .bind(feedback.created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_documents(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProjectDocument>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM project_documents WHERE project_id = $1 ORDER BY created_at ASC, document_id ASC",
            DOCUMENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ProjectDocument>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_document(
        &self,
        document: NewDocument,
    ) -> Result<ProjectDocument, DatabaseError> {
        let sql = format!(
            "INSERT INTO project_documents (project_id, file_name, file_path, document_type) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            DOCUMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ProjectDocument>(&sql)
            .bind(document.project_id)
            .bind(document.file_name)
            .bind(document.file_path)
            .bind(document.document_type)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
