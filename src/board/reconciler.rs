//! Reconciler: replaces the cache with the service's authoritative list.
//!
//! This is the only recovery path after a rejected status change. It is
//! coarse on purpose: the whole project is reloaded, so any other
//! unconfirmed local change is dropped too and collaborators' edits are
//! picked up.

use super::models::ProjectId;
use super::notify::Notice;
use super::state::Board;
use crate::errors::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cache now holds exactly the returned list.
    Applied { count: usize },
    /// The project changed or a newer load started while this one was in
    /// flight; its result was dropped.
    Discarded,
}

impl Board {
    /// Fetch `project_id`'s tasks and replace the cache with them.
    ///
    /// A load for a project other than the selected one is not started.
    /// On failure the cache is left untouched, the user is told, and the
    /// service error is returned.
    pub async fn reload_project(&self, project_id: ProjectId) -> Result<LoadOutcome, BoardError> {
        let generation = {
            let mut state = self.lock()?;
            if state.project != Some(project_id) {
                tracing::debug!(project_id, selected = ?state.project, "Skipping load for unselected project");
                return Ok(LoadOutcome::Discarded);
            }
            state.generation += 1;
            state.loading = true;
            state.generation
        };

        tracing::debug!(project_id, generation, "Loading tasks");
        let result = self.service.list_tasks_by_project(project_id).await;

        let mut state = self.lock()?;
        // Only the latest load owns the loading flag.
        let latest = state.generation == generation;
        if latest {
            state.loading = false;
        }
        let current = latest && state.project == Some(project_id);

        match result {
            Ok(tasks) if current => {
                let count = tasks.len();
                state.cache.replace_all(tasks);
                tracing::info!(project_id, count, "Loaded tasks");
                Ok(LoadOutcome::Applied { count })
            }
            Ok(_) => {
                tracing::debug!(project_id, generation, "Discarding superseded task load");
                Ok(LoadOutcome::Discarded)
            }
            Err(e) => {
                drop(state);
                tracing::error!(project_id, error = %e, "Failed to load tasks");
                if current {
                    self.notify(Notice::load_failed());
                }
                Err(e.into())
            }
        }
    }
}
