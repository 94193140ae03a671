use serde::{Deserialize, Serialize};

use crate::database::models::{
    Expense, FundDisbursement, ProgressFeedback, ProgressUpdate, Project,
};
use crate::database::{DatabaseError, Store};
use crate::services::funds::{summarize, FundsSummary};

/// LPJ (Laporan Pertanggungjawaban): everything recorded against one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LpjReport {
    pub project: Project,
    pub disbursements: Vec<FundDisbursement>,
    pub expenses: Vec<Expense>,
    pub progress: Vec<ProgressUpdate>,
    pub feedback: Vec<ProgressFeedback>,
    pub summary: FundsSummary,
}

/// Reads the five related tables concurrently
pub async fn generate_lpj(store: &dyn Store, project_id: i64) -> Result<LpjReport, DatabaseError> {
    let (project, disbursements, expenses, progress, feedback) = futures::try_join!(
        store.find_project(project_id),
        store.list_disbursements(Some(project_id)),
        store.list_expenses(Some(project_id)),
        store.list_progress(project_id),
        store.list_feedback(project_id),
    )?;

    let project =
        project.ok_or_else(|| DatabaseError::NotFound("Project not found".to_string()))?;

    let summary = summarize(
        disbursements.iter().map(|d| d.amount),
        expenses.iter().map(|e| e.amount_spent),
    );

    Ok(LpjReport {
        project,
        disbursements,
        expenses,
        progress,
        feedback,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewDisbursement, NewExpense, NewFeedback, NewProject};
    use crate::database::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let store = MemoryStore::new();
        let err = generate_lpj(&store, 5).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn report_is_scoped_to_one_project() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for title in ["Jalan Desa", "Sumur"] {
            let project = store
                .insert_project(NewProject {
                    title: title.to_string(),
                    description: None,
                    location: None,
                    estimated_budget: Decimal::new(1000, 0),
                    created_by: None,
                })
                .await
                .unwrap();
            ids.push(project.project_id);
        }
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        for project_id in &ids {
            store
                .insert_disbursement(NewDisbursement {
                    project_id: *project_id,
                    amount: Decimal::new(100, 0),
                    date_received: date,
                    phase: Some("1".to_string()),
                    source_of_fund: Some("Dana Desa".to_string()),
                })
                .await
                .unwrap();
        }
        store
            .insert_expense(NewExpense {
                project_id: ids[0],
                description: Some("semen".to_string()),
                amount_spent: Decimal::new(40, 0),
                date_spent: date,
            })
            .await
            .unwrap();
        store
            .insert_feedback(NewFeedback {
                project_id: ids[0],
                comment_text: "Bagus".to_string(),
                created_by: None,
            })
            .await
            .unwrap();

        let report = generate_lpj(&store, ids[0]).await.unwrap();
        assert_eq!(report.project.title, "Jalan Desa");
        assert_eq!(report.disbursements.len(), 1);
        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.feedback.len(), 1);
        assert!(report.progress.is_empty());
        assert_eq!(report.summary.remaining, Decimal::new(60, 0));
    }
}
