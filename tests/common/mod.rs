//! Shared helpers for integration tests: task builders and an axum fake of
//! the Task Service REST API.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};

use legion_board::board::models::{
    CreateTaskRequest, Priority, ProjectId, ProjectRef, SprintRef, Task, TaskId, TaskStatus,
    UpdateTaskRequest, UserRef, WorkspaceId,
};

pub fn task(project_id: ProjectId, id: TaskId, status: TaskStatus) -> Task {
    Task {
        id,
        title: format!("Task {}", id),
        description: None,
        status,
        priority: Priority::Medium,
        project: ProjectRef {
            id: project_id,
            key: Some("LEG".to_string()),
            name: Some("Legion".to_string()),
        },
        sprint: None,
        assignee: None,
        reporter: None,
        task_number: Some(id as i32),
        created_at: NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap(),
        updated_at: None,
    }
}

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub workspace: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct BackendState {
    tasks: Vec<Task>,
    projects: Vec<(WorkspaceId, ProjectRef)>,
    reject_status: Option<(u16, Option<String>)>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<BackendState>>;
type ApiError = (StatusCode, Json<Value>);

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn record(state: &Shared, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
    state.lock().unwrap().requests.push(Recorded {
        method,
        path,
        authorization: header(headers, "authorization"),
        workspace: header(headers, "x-workspace-id"),
        body,
    });
}

fn not_found(id: TaskId) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Task not found with id: {}", id) })),
    )
}

fn with_task<F>(state: &Shared, id: TaskId, f: F) -> Result<Json<Task>, ApiError>
where
    F: FnOnce(&mut Task),
{
    let mut guard = state.lock().unwrap();
    let task = guard
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| not_found(id))?;
    f(task);
    task.updated_at = NaiveDate::from_ymd_opt(2025, 3, 2).and_then(|d| d.and_hms_opt(12, 0, 0));
    Ok(Json(task.clone()))
}

async fn list_all(State(state): State<Shared>, headers: HeaderMap) -> Json<Vec<Task>> {
    record(&state, "GET", "/tasks".to_string(), &headers, None);
    Json(state.lock().unwrap().tasks.clone())
}

async fn list_by_project(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<ProjectId>,
) -> Json<Vec<Task>> {
    record(&state, "GET", format!("/tasks/project/{}", id), &headers, None);
    let guard = state.lock().unwrap();
    Json(guard.tasks.iter().filter(|t| t.project.id == id).cloned().collect())
}

async fn list_by_sprint(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Json<Vec<Task>> {
    record(&state, "GET", format!("/tasks/sprint/{}", id), &headers, None);
    let guard = state.lock().unwrap();
    Json(
        guard
            .tasks
            .iter()
            .filter(|t| t.sprint.as_ref().is_some_and(|s| s.id == id))
            .cloned()
            .collect(),
    )
}

async fn list_by_assignee(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Json<Vec<Task>> {
    record(&state, "GET", format!("/tasks/assignee/{}", id), &headers, None);
    let guard = state.lock().unwrap();
    Json(
        guard
            .tasks
            .iter()
            .filter(|t| t.assignee.as_ref().is_some_and(|u| u.id == id))
            .cloned()
            .collect(),
    )
}

async fn get_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
) -> Result<Json<Task>, ApiError> {
    record(&state, "GET", format!("/tasks/{}", id), &headers, None);
    let guard = state.lock().unwrap();
    guard
        .tasks
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn create_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    record(&state, "POST", "/tasks".to_string(), &headers, Some(body.clone()));
    let request: CreateTaskRequest = serde_json::from_value(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": e.to_string() })),
        )
    })?;

    let mut guard = state.lock().unwrap();
    let id = guard.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let mut created = task(request.project_id, id, request.status);
    created.title = request.title;
    created.description = request.description;
    created.priority = request.priority;
    created.reporter = Some(UserRef {
        id: request.reporter_id,
        full_name: None,
        email: None,
    });
    guard.tasks.push(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, ApiError> {
    record(&state, "PUT", format!("/tasks/{}", id), &headers, Some(body.clone()));
    let request: UpdateTaskRequest = serde_json::from_value(body).unwrap_or_default();
    with_task(&state, id, |t| {
        if let Some(title) = request.title {
            t.title = title;
        }
        if let Some(description) = request.description {
            t.description = Some(description);
        }
        if let Some(priority) = request.priority {
            t.priority = priority;
        }
    })
}

async fn delete_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    record(&state, "DELETE", format!("/tasks/{}", id), &headers, None);
    let mut guard = state.lock().unwrap();
    let before = guard.tasks.len();
    guard.tasks.retain(|t| t.id != id);
    if guard.tasks.len() == before {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn update_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, ApiError> {
    record(&state, "PATCH", format!("/tasks/{}/status", id), &headers, Some(body.clone()));

    let reject = state.lock().unwrap().reject_status.clone();
    if let Some((code, message)) = reject {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
        let body = match message {
            Some(message) => json!({ "status": code, "message": message }),
            None => json!({ "status": code, "error": "rejected" }),
        };
        return Err((status, Json(body)));
    }

    let status: TaskStatus = serde_json::from_value(body["status"].clone()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": e.to_string() })),
        )
    })?;
    with_task(&state, id, |t| t.status = status)
}

async fn assign_sprint(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, ApiError> {
    record(&state, "PATCH", format!("/tasks/{}/sprint", id), &headers, Some(body.clone()));
    let sprint = body["sprintId"].as_i64().map(|sid| SprintRef { id: sid, name: None });
    with_task(&state, id, |t| t.sprint = sprint)
}

async fn assign_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, ApiError> {
    record(&state, "PATCH", format!("/tasks/{}/assignee", id), &headers, Some(body.clone()));
    let assignee = body["assigneeId"].as_i64().map(|uid| UserRef {
        id: uid,
        full_name: None,
        email: None,
    });
    with_task(&state, id, |t| t.assignee = assignee)
}

async fn list_projects(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<WorkspaceId>,
) -> Json<Vec<Value>> {
    record(&state, "GET", format!("/projects/workspace/{}", id), &headers, None);
    let guard = state.lock().unwrap();
    Json(
        guard
            .projects
            .iter()
            .filter(|(workspace, _)| *workspace == id)
            .map(|(_, p)| {
                json!({
                    "id": p.id,
                    "key": p.key,
                    "name": p.name,
                    "description": null,
                    "createdAt": "2025-03-01T09:00:00",
                })
            })
            .collect(),
    )
}

fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/projects/workspace/{id}", get(list_projects))
        .route("/tasks", get(list_all).post(create_task))
        .route("/tasks/project/{id}", get(list_by_project))
        .route("/tasks/sprint/{id}", get(list_by_sprint))
        .route("/tasks/assignee/{id}", get(list_by_assignee))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/status", patch(update_status))
        .route("/tasks/{id}/sprint", patch(assign_sprint))
        .route("/tasks/{id}/assignee", patch(assign_user))
        .with_state(state);
    Router::new().nest("/api", api)
}

/// Fake Task Service listening on an ephemeral port.
pub struct FakeBackend {
    state: Shared,
    pub addr: SocketAddr,
}

impl FakeBackend {
    /// Start serving on the current runtime.
    pub async fn spawn(tasks: Vec<Task>) -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            tasks,
            ..Default::default()
        }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { state, addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Add a project to `workspace`, listed in insertion order.
    pub fn add_project(&self, workspace: WorkspaceId, id: ProjectId, key: &str, name: &str) {
        self.state.lock().unwrap().projects.push((
            workspace,
            ProjectRef {
                id,
                key: Some(key.to_string()),
                name: Some(name.to_string()),
            },
        ));
    }

    pub fn reject_status_updates(&self, code: u16, message: Option<&str>) {
        self.state.lock().unwrap().reject_status = Some((code, message.map(str::to_string)));
    }

    pub fn set_status(&self, id: TaskId, status: TaskStatus) {
        let mut guard = self.state.lock().unwrap();
        if let Some(t) = guard.tasks.iter_mut().find(|t| t.id == id) {
            t.status = status;
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests whose path matches `path` exactly.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}
