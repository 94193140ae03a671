use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::{DatabaseError, Store};

/// Money in, money out, and what is left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsSummary {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_disbursed: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub remaining: Decimal,
}

/// Exact decimal totals; `remaining` is always `total_disbursed - total_spent`
pub fn summarize<D, S>(disbursed: D, spent: S) -> FundsSummary
where
    D: IntoIterator<Item = Decimal>,
    S: IntoIterator<Item = Decimal>,
{
    let total_disbursed: Decimal = disbursed.into_iter().sum();
    let total_spent: Decimal = spent.into_iter().sum();

    FundsSummary {
        total_disbursed,
        total_spent,
        remaining: total_disbursed - total_spent,
    }
}

/// Totals across every project
pub async fn funds_summary(store: &dyn Store) -> Result<FundsSummary, DatabaseError> {
    let (disbursements, expenses) =
        futures::try_join!(store.list_disbursements(None), store.list_expenses(None))?;

    Ok(summarize(
        disbursements.iter().map(|d| d.amount),
        expenses.iter().map(|e| e.amount_spent),
    ))
}
