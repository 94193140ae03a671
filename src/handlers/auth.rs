// handlers/auth.rs - POST /api/auth/register, POST /api/auth/login, GET /api/auth/me

use axum::{extract::State, Extension};
use serde::{Deserialize, Serialize};

use crate::api::fields::{optional_text, required_text};
use crate::api::ApiJson;
use crate::auth::{generate_jwt, hash_password_blocking, verify_password_blocking, Claims};
use crate::database::models::{NewUser, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// Role given to accounts registered without one
pub const DEFAULT_ROLE: &str = "villager";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned by register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    let claims = Claims::new(
        user.user_id,
        user.role.clone(),
        state.config.security.jwt_expiry_hours,
    );
    Ok(generate_jwt(&claims, &state.config.security.jwt_secret)?)
}

/// POST /api/auth/register - create an account and sign a token for it
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let name = required_text("name", req.name)?;
    let email = required_text("email", req.email)?;
    let password = match req.password {
        Some(password) if !password.is_empty() => password,
        _ => return Err(ApiError::invalid_field("password", "is required")),
    };
    let role = optional_text(req.role).unwrap_or_else(|| DEFAULT_ROLE.to_string());

    let password_hash = hash_password_blocking(password).await?;
    let user = state
        .store
        .insert_user(NewUser {
            name,
            email,
            password_hash,
            role,
        })
        .await?;

    tracing::info!(user_id = user.user_id, role = %user.role, "Registered user");

    let token = issue_token(&state, &user)?;
    Ok(ApiResponse::created(AuthResponse { user, token }))
}

/// POST /api/auth/login - exchange email and password for a token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let user = state.store.find_user_by_email(req.email.trim()).await?;

    let verified = match &user {
        Some(user) => {
            verify_password_blocking(req.password, user.password_hash.clone()).await
        }
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!(email = %req.email, "Failed login attempt");
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    };

    let token = issue_token(&state, &user)?;
    Ok(ApiResponse::success(AuthResponse { user, token }))
}

/// GET /api/auth/me - the account behind the bearer token
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<User> {
    let user = state
        .store
        .find_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(user))
}
