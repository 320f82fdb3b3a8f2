//! Drag Interaction Controller.
//!
//! Tracks the task being dragged and resolves a drop into a status move.
//! Drop targets arrive as raw droppable ids; a column's id is its status
//! name (`"IN_PROGRESS"`), anything else is not a valid target.

use std::str::FromStr;

use super::cache::TaskCache;
use super::models::{Task, TaskId, TaskStatus};

/// A resolved status change for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMove {
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Why a drop did or did not produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResolution {
    /// Released outside any column, or over something that is not a column.
    NoTarget,
    /// The dragged id is not in the cache.
    UnknownTask,
    /// Dropped back onto the column it already sits in.
    Unchanged,
    Move(StatusMove),
}

/// Map a raw droppable id to a column status.
pub fn resolve_drop_target(over: Option<&str>) -> Option<TaskStatus> {
    TaskStatus::from_str(over?).ok()
}

#[derive(Debug, Default)]
pub struct DragController {
    active: Option<TaskId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<TaskId> {
        self.active
    }

    /// Record the dragged task and return it for the drag overlay.
    /// Ids that are not cached are not recorded.
    pub fn start<'a>(&mut self, task_id: TaskId, cache: &'a TaskCache) -> Option<&'a Task> {
        let task = cache.get(task_id);
        self.active = task.map(|t| t.id);
        task
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Resolve a drop. Always clears the active drag.
    pub fn end(&mut self, task_id: TaskId, over: Option<&str>, cache: &TaskCache) -> DropResolution {
        self.active = None;

        let Some(to) = resolve_drop_target(over) else {
            tracing::debug!(task_id, over = ?over, "Drop without a valid target");
            return DropResolution::NoTarget;
        };

        let Some(task) = cache.get(task_id) else {
            tracing::debug!(task_id, "Dropped task not found in cache");
            return DropResolution::UnknownTask;
        };

        if task.status == to {
            tracing::debug!(task_id, status = %to, "Same status, no change needed");
            return DropResolution::Unchanged;
        }

        DropResolution::Move(StatusMove {
            task_id,
            from: task.status,
            to,
        })
    }
}
