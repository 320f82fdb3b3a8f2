//! The board handle and the state container it shares between clones.
//!
//! All board state sits behind one mutex. Operations take the lock, do
//! their synchronous work, and release it before awaiting the service, so a
//! reader never sees a half-applied change and concurrent drags interleave
//! only at network calls.

use std::sync::{Arc, Mutex, MutexGuard};

use super::cache::TaskCache;
use super::drag::DragController;
use super::models::{ColumnView, ProjectId, Task, TaskId, TaskStatus};
use super::notify::{Notice, Notifier};
use super::reconciler::LoadOutcome;
use crate::errors::BoardError;
use crate::service::TaskService;

/// Behaviour switches for a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardOptions {
    /// Replace the cached entry with the service's record after a confirmed
    /// status change. Off by default: the optimistic value is kept as is.
    pub merge_confirmed: bool,
}

#[derive(Debug, Default)]
pub(crate) struct BoardState {
    pub(crate) project: Option<ProjectId>,
    pub(crate) cache: TaskCache,
    pub(crate) drag: DragController,
    pub(crate) loading: bool,
    /// Bumped on every project change and every load start. A load applies
    /// its result only if the generation is unchanged when it settles.
    pub(crate) generation: u64,
}

/// Cloneable handle to one board view.
#[derive(Clone)]
pub struct Board {
    pub(crate) state: Arc<Mutex<BoardState>>,
    pub(crate) service: Arc<dyn TaskService>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) options: BoardOptions,
}

impl Board {
    pub fn new(service: Arc<dyn TaskService>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_options(service, notifier, BoardOptions::default())
    }

    pub fn with_options(
        service: Arc<dyn TaskService>,
        notifier: Arc<dyn Notifier>,
        options: BoardOptions,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            service,
            notifier,
            options,
        }
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, BoardState>, BoardError> {
        self.state.lock().map_err(|_| BoardError::LockPoisoned)
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.notifier.notify(&notice);
    }

    // ── Project selection ────────────────────────────────────────────

    /// Switch to a project: the cache is discarded and the project's tasks
    /// are loaded.
    pub async fn select_project(&self, project_id: ProjectId) -> Result<LoadOutcome, BoardError> {
        {
            let mut state = self.lock()?;
            state.project = Some(project_id);
            state.cache.clear();
            state.drag.cancel();
            state.generation += 1;
        }
        tracing::info!(project_id, "Project selected");
        self.reload_project(project_id).await
    }

    /// Drop the selection and the cache. Pending loads are discarded.
    pub fn clear_project(&self) -> Result<(), BoardError> {
        let mut state = self.lock()?;
        state.project = None;
        state.cache.clear();
        state.drag.cancel();
        state.loading = false;
        state.generation += 1;
        Ok(())
    }

    /// Reload the selected project from the service.
    pub async fn reload(&self) -> Result<LoadOutcome, BoardError> {
        let project_id = self
            .selected_project()?
            .ok_or(BoardError::NoProjectSelected)?;
        self.reload_project(project_id).await
    }

    // ── Edits from task modals ───────────────────────────────────────

    /// A task was created elsewhere; append it if it belongs to this board.
    pub fn task_created(&self, task: Task) -> Result<bool, BoardError> {
        let mut state = self.lock()?;
        if state.project != Some(task.project.id) {
            return Ok(false);
        }
        state.cache.push(task);
        Ok(true)
    }

    /// A task was edited elsewhere; replace the cached entry in place.
    pub fn task_updated(&self, task: Task) -> Result<bool, BoardError> {
        Ok(self.lock()?.cache.replace(task))
    }

    pub fn task_deleted(&self, task_id: TaskId) -> Result<bool, BoardError> {
        let mut state = self.lock()?;
        if state.drag.active() == Some(task_id) {
            state.drag.cancel();
        }
        Ok(state.cache.remove(task_id).is_some())
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn selected_project(&self) -> Result<Option<ProjectId>, BoardError> {
        Ok(self.lock()?.project)
    }

    pub fn is_loading(&self) -> Result<bool, BoardError> {
        Ok(self.lock()?.loading)
    }

    /// Snapshot of the cache in order.
    pub fn tasks(&self) -> Result<Vec<Task>, BoardError> {
        Ok(self.lock()?.cache.tasks().to_vec())
    }

    pub fn task(&self, task_id: TaskId) -> Result<Option<Task>, BoardError> {
        Ok(self.lock()?.cache.get(task_id).cloned())
    }

    pub fn status_of(&self, task_id: TaskId) -> Result<Option<TaskStatus>, BoardError> {
        Ok(self.lock()?.cache.get(task_id).map(|t| t.status))
    }

    pub fn tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, BoardError> {
        Ok(self.lock()?.cache.by_status(status))
    }

    pub fn columns(&self) -> Result<Vec<ColumnView>, BoardError> {
        Ok(self.lock()?.cache.columns())
    }

    /// The task currently being dragged, for the drag overlay.
    pub fn active_task(&self) -> Result<Option<Task>, BoardError> {
        let state = self.lock()?;
        Ok(state.drag.active().and_then(|id| state.cache.get(id).cloned()))
    }
}
