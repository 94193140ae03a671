pub mod auth;
pub mod funds;
pub mod metrics;
pub mod projects;
pub mod report;
