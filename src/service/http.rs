use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ProjectService, ServiceResult, TaskService};
use crate::board::models::{
    CreateTaskRequest, ProjectId, ProjectRef, SprintId, Task, TaskId, TaskStatus, UpdateTaskRequest,
    UserId, WorkspaceId,
};
use crate::errors::ServiceError;

/// Header carrying the selected workspace.
pub const WORKSPACE_HEADER: &str = "X-Workspace-Id";

/// Connection settings for the REST Task Service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// API root, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    pub token: Option<String>,
    pub workspace_id: Option<i64>,
    /// `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            workspace_id: None,
            timeout: None,
        }
    }
}

/// Error document returned by the service on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `TaskService` over HTTP/JSON.
pub struct HttpTaskService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpTaskService {
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(workspace_id) = self.config.workspace_id {
            builder = builder.header(WORKSPACE_HEADER, workspace_id.to_string());
        }
        builder
    }

    /// Send and turn transport failures and non-success statuses into errors.
    async fn send(&self, builder: RequestBuilder, url: &str) -> ServiceResult<Response> {
        let resp = builder.send().await.map_err(|source| ServiceError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "Task service call succeeded");
            return Ok(resp);
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(url, status = status.as_u16(), error = %e, "Failed to read error body");
                String::new()
            }
        };
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        tracing::warn!(url, status = status.as_u16(), message = ?message, "Task service rejected request");
        Err(ServiceError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &str) -> ServiceResult<T> {
        let resp = self.send(builder, url).await?;
        resp.json::<T>().await.map_err(|source| ServiceError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get_list(&self, path: &str) -> ServiceResult<Vec<Task>> {
        let url = self.url(path);
        self.send_json(self.request(Method::GET, &url), &url).await
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks_by_project(&self, project_id: ProjectId) -> ServiceResult<Vec<Task>> {
        self.get_list(&format!("/tasks/project/{}", project_id)).await
    }

    async fn update_task_status(&self, task_id: TaskId, status: TaskStatus) -> ServiceResult<Task> {
        let url = self.url(&format!("/tasks/{}/status", task_id));
        let builder = self
            .request(Method::PATCH, &url)
            .json(&serde_json::json!({ "status": status }));
        self.send_json(builder, &url).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> ServiceResult<Task> {
        let url = self.url("/tasks");
        let builder = self.request(Method::POST, &url).json(request);
        self.send_json(builder, &url).await
    }

    async fn get_task(&self, task_id: TaskId) -> ServiceResult<Task> {
        let url = self.url(&format!("/tasks/{}", task_id));
        self.send_json(self.request(Method::GET, &url), &url).await
    }

    async fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        self.get_list("/tasks").await
    }

    async fn list_tasks_by_sprint(&self, sprint_id: SprintId) -> ServiceResult<Vec<Task>> {
        self.get_list(&format!("/tasks/sprint/{}", sprint_id)).await
    }

    async fn list_tasks_by_assignee(&self, assignee_id: UserId) -> ServiceResult<Vec<Task>> {
        self.get_list(&format!("/tasks/assignee/{}", assignee_id)).await
    }

    async fn assign_sprint(&self, task_id: TaskId, sprint_id: Option<SprintId>) -> ServiceResult<Task> {
        let url = self.url(&format!("/tasks/{}/sprint", task_id));
        let builder = self
            .request(Method::PATCH, &url)
            .json(&serde_json::json!({ "sprintId": sprint_id }));
        self.send_json(builder, &url).await
    }

    async fn assign_user(&self, task_id: TaskId, assignee_id: Option<UserId>) -> ServiceResult<Task> {
        let url = self.url(&format!("/tasks/{}/assignee", task_id));
        let builder = self
            .request(Method::PATCH, &url)
            .json(&serde_json::json!({ "assigneeId": assignee_id }));
        self.send_json(builder, &url).await
    }

    async fn update_task(&self, task_id: TaskId, request: &UpdateTaskRequest) -> ServiceResult<Task> {
        let url = self.url(&format!("/tasks/{}", task_id));
        let builder = self.request(Method::PUT, &url).json(request);
        self.send_json(builder, &url).await
    }

    async fn delete_task(&self, task_id: TaskId) -> ServiceResult<()> {
        let url = self.url(&format!("/tasks/{}", task_id));
        self.send(self.request(Method::DELETE, &url), &url).await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectService for HttpTaskService {
    async fn list_projects_by_workspace(&self, workspace_id: WorkspaceId) -> ServiceResult<Vec<ProjectRef>> {
        let url = self.url(&format!("/projects/workspace/{}", workspace_id));
        self.send_json(self.request(Method::GET, &url), &url).await
    }
}
