// handlers/mod.rs - one module per resource
//
// Reads are public. Every POST/PUT outside /api/auth is wrapped in
// `middleware::require_auth` by the router in `app.rs`, so handlers that
// take `Extension<AuthUser>` can rely on it being present.

pub mod auth;
pub mod documents;
pub mod funds;
pub mod metrics;
pub mod progress;
pub mod projects;
pub mod reports;
pub mod root;
pub mod schedule;
