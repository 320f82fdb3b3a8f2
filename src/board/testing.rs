//! Test doubles shared by the board unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Notify, Semaphore};

use super::models::*;
use crate::errors::ServiceError;
use crate::service::{ServiceResult, TaskService};

pub(crate) const PROJECT: ProjectId = 1;

pub(crate) fn task(id: TaskId, status: TaskStatus) -> Task {
    task_in(PROJECT, id, status)
}

pub(crate) fn task_in(project_id: ProjectId, id: TaskId, status: TaskStatus) -> Task {
    Task {
        id,
        title: format!("Task {}", id),
        description: None,
        status,
        priority: Priority::Medium,
        project: ProjectRef {
            id: project_id,
            key: Some("LEG".to_string()),
            name: None,
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

/// In-memory service holding the "server truth" for any number of projects.
#[derive(Default)]
pub(crate) struct FakeService {
    pub(crate) server: Mutex<Vec<Task>>,
    reject: Mutex<Option<(u16, Option<String>)>>,
    fail_loads: AtomicBool,
    pub(crate) update_calls: Mutex<Vec<(TaskId, TaskStatus)>>,
    pub(crate) list_calls: AtomicUsize,
    /// When set, updates wait for a permit before answering.
    gate: Option<Arc<Semaphore>>,
    pub(crate) arrived: Notify,
    /// One gate per upcoming list call, consumed in call order. Only gated
    /// calls signal `list_arrived`.
    list_gates: Mutex<VecDeque<Arc<Semaphore>>>,
    pub(crate) list_arrived: Notify,
}

impl FakeService {
    pub(crate) fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            server: Mutex::new(tasks),
            ..Default::default()
        }
    }

    pub(crate) fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Hold the next not-yet-gated list call until the returned gate gets a
    /// permit. The list is read when the call arrives, not when it answers.
    pub(crate) fn gate_next_list(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.list_gates.lock().unwrap().push_back(gate.clone());
        gate
    }

    pub(crate) fn reject_updates(&self, status: u16, message: Option<&str>) {
        *self.reject.lock().unwrap() = Some((status, message.map(str::to_string)));
    }

    pub(crate) fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_server_status(&self, id: TaskId, status: TaskStatus) {
        let mut server = self.server.lock().unwrap();
        if let Some(t) = server.iter_mut().find(|t| t.id == id) {
            t.status = status;
        }
    }

    pub(crate) fn updates(&self) -> Vec<(TaskId, TaskStatus)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub(crate) fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn unsupported<T>() -> ServiceResult<T> {
        Err(ServiceError::Other(anyhow::anyhow!("not supported by FakeService")))
    }
}

#[async_trait]
impl TaskService for FakeService {
    async fn list_tasks_by_project(&self, project_id: ProjectId) -> ServiceResult<Vec<Task>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.list_gates.lock().unwrap().pop_front();

        let result = if self.fail_loads.load(Ordering::SeqCst) {
            Err(ServiceError::Rejected {
                status: 503,
                message: None,
            })
        } else {
            let server = self.server.lock().unwrap();
            Ok(server
                .iter()
                .filter(|t| t.project.id == project_id)
                .cloned()
                .collect())
        };

        if let Some(gate) = gate {
            self.list_arrived.notify_one();
            gate.acquire().await.unwrap().forget();
        }
        result
    }

    async fn update_task_status(&self, task_id: TaskId, status: TaskStatus) -> ServiceResult<Task> {
        self.update_calls.lock().unwrap().push((task_id, status));
        self.arrived.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        if let Some((code, message)) = self.reject.lock().unwrap().clone() {
            return Err(ServiceError::Rejected {
                status: code,
                message,
            });
        }

        let mut server = self.server.lock().unwrap();
        let task = server
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ServiceError::rejected(404, format!("Task not found with id: {}", task_id)))?;
        task.status = status;
        task.updated_at = NaiveDate::from_ymd_opt(2025, 3, 2).and_then(|d| d.and_hms_opt(12, 0, 0));
        Ok(task.clone())
    }

    async fn create_task(&self, _request: &CreateTaskRequest) -> ServiceResult<Task> {
        Self::unsupported()
    }

    async fn get_task(&self, task_id: TaskId) -> ServiceResult<Task> {
        let server = self.server.lock().unwrap();
        server
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| ServiceError::rejected(404, "Task not found"))
    }

    async fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.server.lock().unwrap().clone())
    }

    async fn list_tasks_by_sprint(&self, _sprint_id: SprintId) -> ServiceResult<Vec<Task>> {
        Self::unsupported()
    }

    async fn list_tasks_by_assignee(&self, _assignee_id: UserId) -> ServiceResult<Vec<Task>> {
        Self::unsupported()
    }

    async fn assign_sprint(&self, _task_id: TaskId, _sprint_id: Option<SprintId>) -> ServiceResult<Task> {
        Self::unsupported()
    }

    async fn assign_user(&self, _task_id: TaskId, _assignee_id: Option<UserId>) -> ServiceResult<Task> {
        Self::unsupported()
    }

    async fn update_task(&self, _task_id: TaskId, _request: &UpdateTaskRequest) -> ServiceResult<Task> {
        Self::unsupported()
    }

    async fn delete_task(&self, _task_id: TaskId) -> ServiceResult<()> {
        Self::unsupported()
    }
}
