use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Expense, FundDisbursement, NewDisbursement, NewDocument, NewExpense, NewFeedback,
    NewProgressUpdate, NewProject, NewScheduleItem, NewUser, ProgressFeedback, ProgressUpdate,
    Project, ProjectDocument, ScheduleItem, User, DRAFT_STATUS,
};
use crate::database::store::Store;

/// Rows plus the identity sequence, like a BIGSERIAL table
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    sequence: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            sequence: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<User>,
    projects: Table<Project>,
    schedule: Table<ScheduleItem>,
    disbursements: Table<FundDisbursement>,
    expenses: Table<Expense>,
    progress: Table<ProgressUpdate>,
    feedback: Table<ProgressFeedback>,
    documents: Table<ProjectDocument>,
}

impl Tables {
    /// Same wording as the Postgres foreign-key violation
    fn require_project(&self, table: &str, project_id: i64) -> Result<(), DatabaseError> {
        if self.projects.rows.iter().any(|p| p.project_id == project_id) {
            Ok(())
        } else {
            Err(DatabaseError::Constraint(format!(
                "insert or update on table \"{}\" violates foreign key constraint \"{}_project_id_fkey\"",
                table, table
            )))
        }
    }
}

/// Process-local store used by tests and by runs without `DATABASE_URL`.
///
/// A single lock over all tables makes every operation atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_priority_then_newest(a: &Project, b: &Project) -> Ordering {
    let rank = match (a.priority, b.priority) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    rank.then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.project_id.cmp(&a.project_id))
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.rows.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Constraint(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ));
        }

        let row = User {
            user_id: tables.users.next_id(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.rows.push(row.clone());
        Ok(row)
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.rows.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, DatabaseError> {
        let mut tables = self.tables.write().await;
        let row = Project {
            project_id: tables.projects.next_id(),
            title: project.title,
            description: project.description,
            location: project.location,
            estimated_budget: project.estimated_budget,
            status: DRAFT_STATUS.to_string(),
            priority: None,
            created_by: project.created_by,
            created_at: Utc::now(),
        };
        tables.projects.rows.push(row.clone());
        Ok(row)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows = tables.projects.rows.clone();
        rows.sort_by(by_priority_then_newest);
        Ok(rows)
    }

    async fn find_project(&self, project_id: i64) -> Result<Option<Project>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .rows
            .iter()
            .find(|p| p.project_id == project_id)
            .cloned())
    }

    async fn update_project_status(
        &self,
        project_id: i64,
        status: &str,
    ) -> Result<Option<Project>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .projects
            .rows
            .iter_mut()
            .find(|p| p.project_id == project_id)
            .map(|p| {
                p.status = status.to_string();
                p.clone()
            }))
    }

    async fn set_priority_order(&self, project_ids: &[i64]) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;

        // Validate before touching anything so a failure changes nothing
        let known: HashSet<i64> = tables.projects.rows.iter().map(|p| p.project_id).collect();
        if let Some(missing) = project_ids.iter().find(|id| !known.contains(*id)) {
            return Err(DatabaseError::NotFound(format!(
                "Project {} not found",
                missing
            )));
        }

        for project in tables.projects.rows.iter_mut() {
            project.priority = None;
        }
        for (position, id) in project_ids.iter().enumerate() {
            if let Some(project) = tables
                .projects
                .rows
                .iter_mut()
                .find(|p| p.project_id == *id)
            {
                project.priority = Some(position as i32 + 1);
            }
        }
        Ok(())
    }

    async fn list_schedule(&self) -> Result<Vec<ScheduleItem>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows = tables.schedule.rows.clone();
        rows.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.schedule_id.cmp(&b.schedule_id))
        });
        Ok(rows)
    }

    async fn insert_schedule_item(
        &self,
        item: NewScheduleItem,
    ) -> Result<ScheduleItem, DatabaseError> {
        let mut tables = self.tables.write().await;
        let row = ScheduleItem {
            schedule_id: tables.schedule.next_id(),
            title: item.title,
            description: item.description,
            due_date: item.due_date,
            created_at: Utc::now(),
        };
        tables.schedule.rows.push(row.clone());
        Ok(row)
    }

    async fn list_disbursements(
        &self,
        project_id: Option<i64>,
    ) -> Result<Vec<FundDisbursement>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<FundDisbursement> = tables
            .disbursements
            .rows
            .iter()
            .filter(|d| project_id.map_or(true, |id| d.project_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.date_received
                .cmp(&a.date_received)
                .then_with(|| b.disbursement_id.cmp(&a.disbursement_id))
        });
        Ok(rows)
    }

    async fn insert_disbursement(
        &self,
        disbursement: NewDisbursement,
    ) -> Result<FundDisbursement, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_project("fund_disbursements", disbursement.project_id)?;
        let row = FundDisbursement {
            disbursement_id: tables.disbursements.next_id(),
            project_id: disbursement.project_id,
            amount: disbursement.amount,
            date_received: disbursement.date_received,
            phase: disbursement.phase,
            source_of_fund: disbursement.source_of_fund,
            created_at: Utc::now(),
        };
        tables.disbursements.rows.push(row.clone());
        Ok(row)
    }

    async fn list_expenses(&self, project_id: Option<i64>) -> Result<Vec<Expense>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Expense> = tables
            .expenses
            .rows
            .iter()
            .filter(|e| project_id.map_or(true, |id| e.project_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.date_spent
                .cmp(&a.date_spent)
                .then_with(|| b.expense_id.cmp(&a.expense_id))
        });
        Ok(rows)
    }

    async fn insert_expense(&self, expense: NewExpense) -> Result<Expense, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_project("expenses", expense.project_id)?;
        let row = Expense {
            expense_id: tables.expenses.next_id(),
            project_id: expense.project_id,
            description: expense.description,
            amount_spent: expense.amount_spent,
            date_spent: expense.date_spent,
            created_at: Utc::now(),
        };
        tables.expenses.rows.push(row.clone());
        Ok(row)
    }

    async fn list_progress(&self, project_id: i64) -> Result<Vec<ProgressUpdate>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .rows
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_progress(
        &self,
        update: NewProgressUpdate,
    ) -> Result<ProgressUpdate, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_project("progress_updates", update.project_id)?;
        let row = ProgressUpdate {
            progress_id: tables.progress.next_id(),
            project_id: update.project_id,
            notes: update.notes,
            completion_percentage: update.completion_percentage,
            created_by: update.created_by,
            created_at: Utc::now(),
        };
        tables.progress.rows.push(row.clone());
        Ok(row)
    }

    async fn list_feedback(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProgressFeedback>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .feedback
            .rows
            .iter()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_feedback(
        &self,
        feedback: NewFeedback,
    ) -> Result<ProgressFeedback, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_project("progress_feedback", feedback.project_id)?;
        let row = ProgressFeedback {
            feedback_id: tables.feedback.next_id(),
            project_id: feedback.project_id,
            comment_text: feedback.comment_text,
            created_by: feedback.created_by,
            created_at: Utc::now(),
        };
        tables.feedback.rows.push(row.clone());
        Ok(row)
    }

    async fn list_documents(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProjectDocument>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .rows
            .iter()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_document(
        &self,
        document: NewDocument,
    ) -> Result<ProjectDocument, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_project("project_documents", document.project_id)?;
        let row = ProjectDocument {
            document_id: tables.documents.next_id(),
            project_id: document.project_id,
            file_name: document.file_name,
            file_path: document.file_path,
            document_type: document.document_type,
            created_at: Utc::now(),
        };
        tables.documents.rows.push(row.clone());
        Ok(row)
    }
}
