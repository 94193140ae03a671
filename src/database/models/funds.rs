use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Money received for a project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FundDisbursement {
    pub disbursement_id: i64,
    pub project_id: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub date_received: NaiveDate,
    pub phase: Option<String>,
    pub source_of_fund: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDisbursement {
    pub project_id: i64,
    pub amount: Decimal,
    pub date_received: NaiveDate,
    pub phase: Option<String>,
    pub source_of_fund: Option<String>,
}

/// Money spent on a project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub expense_id: i64,
    pub project_id: i64,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount_spent: Decimal,
    pub date_spent: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub project_id: i64,
    pub description: Option<String>,
    pub amount_spent: Decimal,
    pub date_spent: NaiveDate,
}
