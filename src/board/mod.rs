//! Board engine: the client-side state behind the Kanban view.
//!
//! ## Module Map
//!
//! ```text
//!  drag_start / drag_end(task, over)
//!        │
//!        v
//!  drag.rs        DragController ── resolves the drop into a StatusMove
//!        │
//!        v
//!  mutator.rs     writes the move into the cache, then
//!        │        TaskService::update_task_status()
//!        │
//!        ├── Ok  ──> done (cache already correct)
//!        │
//!        └── Err ──> Notifier ("Failed to move task: ...")
//!                     │
//!                     v
//!  reconciler.rs  TaskService::list_tasks_by_project() ──> cache.replace_all()
//! ```
//!
//! | Module       | Responsibility                                          |
//! |--------------|---------------------------------------------------------|
//! | `models`     | `Task`, `TaskStatus`, `Priority`, request bodies        |
//! | `cache`      | `TaskCache`, ordered task list of the selected project  |
//! | `state`      | `Board` handle, `BoardState`, project selection, views  |
//! | `drag`       | `DragController`, drop target resolution                |
//! | `mutator`    | optimistic write and status change dispatch             |
//! | `reconciler` | authoritative reload, stale load detection              |
//! | `notify`     | `Notifier` trait and the notices the board raises       |

pub mod cache;
pub mod drag;
pub mod models;
pub mod mutator;
pub mod notify;
pub mod reconciler;
pub mod state;

pub use drag::{DropResolution, StatusMove};
pub use mutator::DragOutcome;
pub use notify::{LogNotifier, Notice, NoticeKind, Notifier, RecordingNotifier};
pub use reconciler::LoadOutcome;
pub use state::{Board, BoardOptions};

#[cfg(test)]
pub(crate) mod testing;
