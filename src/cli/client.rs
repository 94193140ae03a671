use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use crate::database::models::{Expense, FundDisbursement, Project, User};
use crate::handlers::auth::AuthResponse;
use crate::handlers::projects::PriorityResponse;
use crate::services::{FundsSummary, LpjReport, MonthlyMetrics};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

/// Body for `POST /api/projects`
#[derive(Debug, Clone, Serialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub location: String,
    pub estimated_budget: Decimal,
}

/// Thin typed wrapper over the village HTTP API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .timeout(REQUEST_TIMEOUT);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and decode, turning non-2xx responses into `ClientError::Api`
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
                .to_string();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<AuthResponse, ClientError> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "role": role,
        });
        self.post("/api/auth/register", &body).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        self.post("/api/auth/login", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get("/api/auth/me").await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.get("/api/projects").await
    }

    pub async fn get_project(&self, project_id: i64) -> Result<Project, ClientError> {
        self.get(&format!("/api/projects/{}", project_id)).await
    }

    pub async fn create_project(&self, project: &CreateProject) -> Result<Project, ClientError> {
        self.post("/api/projects", project).await
    }

    pub async fn update_status(
        &self,
        project_id: i64,
        status: &str,
    ) -> Result<Project, ClientError> {
        self.put(
            &format!("/api/projects/{}/status", project_id),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn set_priority(&self, project_ids: &[i64]) -> Result<PriorityResponse, ClientError> {
        self.put("/api/projects/priority", &json!({ "priority_list": project_ids }))
            .await
    }

    pub async fn funds_summary(&self) -> Result<FundsSummary, ClientError> {
        self.get("/api/funds").await
    }

    pub async fn create_disbursement(
        &self,
        project_id: i64,
        amount: Decimal,
        date_received: NaiveDate,
        phase: Option<&str>,
        source_of_fund: Option<&str>,
    ) -> Result<FundDisbursement, ClientError> {
        let body = json!({
            "amount": amount,
            "date_received": date_received,
            "phase": phase,
            "source_of_fund": source_of_fund,
        });
        self.post(&format!("/api/projects/{}/disbursements", project_id), &body)
            .await
    }

    pub async fn create_expense(
        &self,
        project_id: i64,
        amount_spent: Decimal,
        date_spent: NaiveDate,
        description: Option<&str>,
    ) -> Result<Expense, ClientError> {
        let body = json!({
            "amount_spent": amount_spent,
            "date_spent": date_spent,
            "description": description,
        });
        self.post(&format!("/api/projects/{}/expenses", project_id), &body)
            .await
    }

    pub async fn lpj_report(&self, project_id: i64) -> Result<LpjReport, ClientError> {
        self.get(&format!("/api/projects/{}/reports/lpj", project_id))
            .await
    }

    pub async fn monthly_metrics(&self) -> Result<BTreeMap<String, MonthlyMetrics>, ClientError> {
        self.get("/api/metrics/projects-by-month").await
    }
}
