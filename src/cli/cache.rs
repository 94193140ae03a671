use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::cli::client::{ApiClient, ClientError, CreateProject};
use crate::database::models::Project;

pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DEFAULT_LOCATION: &str = "Desa";

/// Fields a user supplies when proposing a project; gaps get village defaults
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub estimated_budget: Option<Decimal>,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    fn into_request(self) -> CreateProject {
        CreateProject {
            title: self.title,
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            location: self.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            estimated_budget: self.estimated_budget.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Client-side project list.
///
/// The lock is held across the request in `add_project`, so concurrent adds
/// append in the order the server answered them.
pub struct ProjectCache {
    client: ApiClient,
    projects: Mutex<Vec<Project>>,
}

impl ProjectCache {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            projects: Mutex::new(Vec::new()),
        }
    }

    /// Replace the cached list with the server's ordering
    pub async fn refresh(&self) -> Result<usize, ClientError> {
        let mut projects = self.projects.lock().await;
        *projects = self.client.list_projects().await?;
        Ok(projects.len())
    }

    /// Create on the server and append the returned row
    pub async fn add_project(&self, draft: ProjectDraft) -> Result<Project, ClientError> {
        let mut projects = self.projects.lock().await;
        let project = self.client.create_project(&draft.into_request()).await?;
        projects.push(project.clone());
        Ok(project)
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.projects.lock().await.clone()
    }

    pub async fn with_status(&self, status: &str) -> Vec<Project> {
        self.projects
            .lock()
            .await
            .iter()
            .filter(|p| p.status.eq_ignore_ascii_case(status))
            .cloned()
            .collect()
    }
}
