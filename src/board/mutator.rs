//! Drag events and the Optimistic Mutator.
//!
//! A resolved move is written to the cache and only then sent to the
//! service, inside the same locked section that resolved it. Success keeps
//! the optimistic value; failure notifies the user and hands the project to
//! the Reconciler.

use super::cache::TaskCache;
use super::drag::{DropResolution, StatusMove};
use super::models::{Task, TaskId, TaskStatus};
use super::notify::Notice;
use super::state::{Board, BoardState};
use crate::errors::BoardError;

/// Result of a drop, once settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed and no request was sent.
    Ignored(DropResolution),
    /// The service accepted the new status.
    Confirmed(StatusMove),
    /// The service rejected the change and the board was reloaded.
    Reverted { change: StatusMove, message: String },
}

impl DragOutcome {
    pub fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// Write the new status into the cache.
pub(crate) fn apply(cache: &mut TaskCache, change: &StatusMove) {
    cache.set_status(change.task_id, change.to);
}

impl Board {
    /// A drag began on `task_id`. Returns the task to show in the overlay.
    pub fn drag_start(&self, task_id: TaskId) -> Result<Option<Task>, BoardError> {
        let mut state = self.lock()?;
        let BoardState { drag, cache, .. } = &mut *state;
        Ok(drag.start(task_id, cache).cloned())
    }

    pub fn drag_cancel(&self) -> Result<(), BoardError> {
        self.lock()?.drag.cancel();
        Ok(())
    }

    /// A drag ended with the pointer over `over` (a droppable id, `None`
    /// when released outside every column).
    pub async fn drag_end(&self, task_id: TaskId, over: Option<&str>) -> Result<DragOutcome, BoardError> {
        let change = {
            let mut state = self.lock()?;
            let BoardState { drag, cache, .. } = &mut *state;
            match drag.end(task_id, over, cache) {
                DropResolution::Move(change) => {
                    apply(cache, &change);
                    change
                }
                other => return Ok(DragOutcome::Ignored(other)),
            }
        };

        self.dispatch(change).await
    }

    /// Move a task without a pointer (keyboard or command line). Follows the
    /// same path as a drop on the target column.
    pub async fn move_task(&self, task_id: TaskId, status: TaskStatus) -> Result<DragOutcome, BoardError> {
        self.drag_end(task_id, Some(status.as_str())).await
    }

    async fn dispatch(&self, change: StatusMove) -> Result<DragOutcome, BoardError> {
        tracing::info!(
            task_id = change.task_id,
            from = %change.from,
            to = %change.to,
            "Moving task"
        );

        match self.service.update_task_status(change.task_id, change.to).await {
            Ok(updated) => {
                tracing::debug!(task_id = change.task_id, "Status change confirmed");
                if self.options.merge_confirmed {
                    self.merge_confirmed(&change, updated)?;
                }
                Ok(DragOutcome::Confirmed(change))
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(
                    task_id = change.task_id,
                    to = %change.to,
                    status = ?e.status(),
                    error = %e,
                    "Failed to move task"
                );
                self.notify(Notice::move_rejected(&message));

                if let Some(project_id) = self.selected_project()? {
                    if let Err(reload_err) = self.reload_project(project_id).await {
                        tracing::warn!(project_id, error = %reload_err, "Reload after rejected move failed");
                    }
                }
                Ok(DragOutcome::Reverted { change, message })
            }
        }
    }

    /// Take the service's record, unless a later local write to the same
    /// task has already moved it elsewhere.
    fn merge_confirmed(&self, change: &StatusMove, updated: Task) -> Result<(), BoardError> {
        let mut state = self.lock()?;
        let still_current = state
            .cache
            .get(change.task_id)
            .is_some_and(|t| t.status == change.to);
        if still_current {
            state.cache.replace(updated);
        }
        Ok(())
    }
}
