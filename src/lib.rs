pub mod board;
pub mod config;
pub mod errors;
pub mod logging;
pub mod service;

pub use board::{Board, BoardOptions, DragOutcome, LoadOutcome};
pub use errors::{BoardError, ServiceError};
pub use service::{HttpTaskService, ProjectService, ServiceConfig, TaskService};
