//! Local Task Cache: the ordered task list of the selected project.

use super::models::{ColumnView, Task, TaskId, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCache {
    tasks: Vec<Task>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every entry and take the given list as the new contents.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Rewrite one entry's status in place. Returns the previous status, or
    /// `None` when the task is not cached.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Option<TaskStatus> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        Some(std::mem::replace(&mut task.status, status))
    }

    /// Replace the entry with the same id. Returns false when no entry matched.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Append a new entry at the end, or replace it in place if already cached.
    pub fn push(&mut self, task: Task) {
        if !self.tasks.iter().any(|t| t.id == task.id) {
            self.tasks.push(task);
        } else {
            self.replace(task);
        }
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Tasks in one column, in cache order.
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }

    /// All five columns in board order.
    pub fn columns(&self) -> Vec<ColumnView> {
        TaskStatus::ALL
            .iter()
            .map(|&status| ColumnView {
                status,
                tasks: self.by_status(status),
            })
            .collect()
    }
}
