pub mod funds;
pub mod metrics;
pub mod report;

pub use funds::{funds_summary, summarize, FundsSummary};
pub use metrics::{month_key, projects_by_month, MonthlyMetrics};
pub use report::{generate_lpj, LpjReport};
