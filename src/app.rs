use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    auth, documents, funds, metrics, progress, projects, reports, root, schedule,
};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Full router: public reads, bearer-guarded writes, global layers
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        .route("/", get(root::index))
        .route("/health", get(root::health))
        .nest(
            "/api",
            public_routes().merge(protected_routes(state.clone())),
        )
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security.cors_origins))
        .with_state(state);

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// No token required
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/projects", get(projects::list))
        .route("/projects/:id", get(projects::get))
        .route("/projects/:id/disbursements", get(funds::list_disbursements))
        .route("/projects/:id/expenses", get(funds::list_expenses))
        .route("/projects/:id/documents", get(documents::list))
        .route("/projects/:id/reports/lpj", get(reports::lpj))
        .route("/schedule", get(schedule::list))
        .route("/funds", get(funds::summary))
        .route("/funds/distribution", get(funds::distribution))
        .route("/metrics/projects-by-month", get(metrics::projects_by_month))
}

/// `Authorization: Bearer` required; merged onto the public paths by method
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/projects", post(projects::create))
        .route("/projects/priority", put(projects::set_priority))
        .route("/projects/:id/status", put(projects::update_status))
        .route("/projects/:id/disbursements", post(funds::create_disbursement))
        .route("/projects/:id/expenses", post(funds::create_expense))
        .route("/projects/:id/progress", post(progress::record_progress))
        .route("/projects/:id/feedback", post(progress::record_feedback))
        .route("/projects/:id/documents", post(documents::upload))
        .route("/schedule", post(schedule::create))
        .route_layer(from_fn_with_state(state, require_auth))
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
