//! Task Service seam.
//!
//! The board engine only talks to the backend through `TaskService`.
//! Real implementation: `HttpTaskService`. Tests plug in in-memory doubles.

pub mod http;

use async_trait::async_trait;

use crate::board::models::{
    CreateTaskRequest, ProjectId, ProjectRef, SprintId, Task, TaskId, TaskStatus, UpdateTaskRequest,
    UserId, WorkspaceId,
};
use crate::errors::ServiceError;

pub use http::{HttpTaskService, ServiceConfig};

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait TaskService: Send + Sync {
    /// Authoritative task list of a project, in service order.
    async fn list_tasks_by_project(&self, project_id: ProjectId) -> ServiceResult<Vec<Task>>;

    /// Set a task's status. Returns the updated record.
    async fn update_task_status(&self, task_id: TaskId, status: TaskStatus) -> ServiceResult<Task>;

    async fn create_task(&self, request: &CreateTaskRequest) -> ServiceResult<Task>;

    async fn get_task(&self, task_id: TaskId) -> ServiceResult<Task>;

    /// Every task in the current workspace.
    async fn list_tasks(&self) -> ServiceResult<Vec<Task>>;

    async fn list_tasks_by_sprint(&self, sprint_id: SprintId) -> ServiceResult<Vec<Task>>;

    async fn list_tasks_by_assignee(&self, assignee_id: UserId) -> ServiceResult<Vec<Task>>;

    /// Move a task into a sprint, or out of any sprint with `None`.
    async fn assign_sprint(&self, task_id: TaskId, sprint_id: Option<SprintId>) -> ServiceResult<Task>;

    /// Assign a task to a user, or unassign it with `None`.
    async fn assign_user(&self, task_id: TaskId, assignee_id: Option<UserId>) -> ServiceResult<Task>;

    async fn update_task(&self, task_id: TaskId, request: &UpdateTaskRequest) -> ServiceResult<Task>;

    async fn delete_task(&self, task_id: TaskId) -> ServiceResult<()>;
}

/// Project lookup used to pick the board's project.
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Projects of a workspace, in service order.
    async fn list_projects_by_workspace(&self, workspace_id: WorkspaceId) -> ServiceResult<Vec<ProjectRef>>;
}
