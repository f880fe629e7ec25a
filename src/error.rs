//! Error types for the chart engine

use thiserror::Error;

use crate::task::TaskId;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the chart engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A render cycle was started with no tasks
    #[error("Cannot render an empty project")]
    EmptyProject,

    /// Two tasks share the same identifier
    #[error("Duplicate task id {task_id}")]
    DuplicateTaskId { task_id: TaskId },

    /// A task references a dependency that does not exist
    #[error("Task {task_id} depends on unknown task {dependency_id}")]
    UnknownDependency {
        task_id: TaskId,
        dependency_id: TaskId,
    },

    /// The dependency graph loops back on itself
    #[error("Task {task_id} is part of a dependency cycle")]
    Cycle { task_id: TaskId },

    /// A colour name outside the chart palette
    #[error("Unknown colour {name:?}")]
    InvalidColor { name: String },

    /// Date arithmetic left the supported calendar range
    #[error("Task {task_id} has a start date or duration outside the supported range")]
    InvalidDate { task_id: TaskId },

    /// An export was requested before any successful render
    #[error("No rendered chart available; call render() first")]
    RenderNotReady,

    /// Failed to rasterize the rendered chart
    #[error("Rasterization failed: {0}")]
    Render(String),
}
