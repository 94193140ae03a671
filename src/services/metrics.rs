use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::database::models::{Expense, Project};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetrics {
    pub projects: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub funds_in: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub funds_out: Decimal,
}

/// `YYYY-MM` bucket key
pub fn month_key(date: &impl Datelike) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Buckets projects by creation month (count and budget as funds in), then
/// adds expenses to the bucket of the month they were spent in.
///
/// Expenses from a month with no project bucket are dropped.
pub fn projects_by_month(
    projects: &[Project],
    expenses: &[Expense],
) -> BTreeMap<String, MonthlyMetrics> {
    let mut metrics: BTreeMap<String, MonthlyMetrics> = BTreeMap::new();

    for project in projects {
        let bucket = metrics.entry(month_key(&project.created_at)).or_default();
        bucket.projects += 1;
        bucket.funds_in += project.estimated_budget;
    }

    for expense in expenses {
        if let Some(bucket) = metrics.get_mut(&month_key(&expense.date_spent)) {
            bucket.funds_out += expense.amount_spent;
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn project(id: i64, year: i32, month: u32, budget: i64) -> Project {
        Project {
            project_id: id,
            title: format!("project {}", id),
            description: None,
            location: None,
            estimated_budget: Decimal::new(budget, 0),
            status: "draft".to_string(),
            priority: None,
            created_by: None,
            created_at: Utc.with_ymd_and_hms(year, month, 15, 8, 0, 0).unwrap(),
        }
    }

    fn expense(id: i64, year: i32, month: u32, amount: i64) -> Expense {
        Expense {
            expense_id: id,
            project_id: 1,
            description: None,
            amount_spent: Decimal::new(amount, 0),
            date_spent: NaiveDate::from_ymd_opt(year, month, 3).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn month_key_zero_pads() {
        assert_eq!(month_key(&NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()), "2024-03");
    }

    #[test]
    fn buckets_projects_and_budgets_by_creation_month() {
        let projects = vec![
            project(1, 2024, 1, 1000),
            project(2, 2024, 1, 500),
            project(3, 2024, 2, 250),
        ];
        let metrics = projects_by_month(&projects, &[]);

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics["2024-01"].projects, 2);
        assert_eq!(metrics["2024-01"].funds_in, Decimal::new(1500, 0));
        assert_eq!(metrics["2024-02"].projects, 1);
        assert_eq!(metrics["2024-02"].funds_out, Decimal::ZERO);
    }

    #[test]
    fn expenses_land_in_matching_month() {
        let projects = vec![project(1, 2024, 1, 1000)];
        let expenses = vec![expense(1, 2024, 1, 40), expense(2, 2024, 1, 60)];
        let metrics = projects_by_month(&projects, &expenses);
        assert_eq!(metrics["2024-01"].funds_out, Decimal::new(100, 0));
    }

    #[test]
    fn expenses_in_months_without_projects_are_dropped() {
        let projects = vec![project(1, 2024, 1, 1000)];
        let expenses = vec![expense(1, 2024, 2, 999), expense(2, 2023, 12, 5)];
        let metrics = projects_by_month(&projects, &expenses);

        assert_eq!(metrics.len(), 1);
        assert!(!metrics.contains_key("2024-02"));
        assert_eq!(metrics["2024-01"].funds_out, Decimal::ZERO);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let metrics = projects_by_month(&[project(1, 2024, 5, 5_000_000)], &[]);
        let value = serde_json::to_value(&metrics).unwrap();
        assert_eq!(value["2024-05"]["projects"], 1);
        assert_eq!(value["2024-05"]["fundsIn"].as_f64(), Some(5_000_000.0));
        assert_eq!(value["2024-05"]["fundsOut"].as_f64(), Some(0.0));
    }
}
