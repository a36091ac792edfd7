use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority. The default when a task is created without one.
    #[default]
    Medium,
    /// High priority.
    High,
}

/// Input structure for creating or replacing a task.
///
/// The owner is deliberately not representable here: it is always supplied by
/// the authenticated identity, so no payload can create or move a task across
/// an account boundary. Any value outside the priority enum fails JSON
/// deserialization before a handler ever runs.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Whether the task is done. Defaults to false.
    #[serde(default)]
    pub completed: bool,

    /// The priority of the task. Defaults to medium.
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional due date, kept as an opaque date-like string.
    pub due_date: Option<String>,

    /// Optional reminder time, kept as an opaque date-like string.
    pub reminder_time: Option<String>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// Whether the task is done.
    pub completed: bool,
    /// The priority of the task.
    pub priority: TaskPriority,
    /// Optional due date for the task.
    pub due_date: Option<String>,
    /// Optional reminder time for the task.
    pub reminder_time: Option<String>,
    /// Identifier of the account that owns the task.
    pub owner_id: i32,
}

impl Task {
    /// Creates a new `Task` from validated input, owned by `owner_id`.
    /// Allocates a fresh UUID; the owner comes from the authenticated
    /// identity, never from the input.
    pub fn new(input: TaskInput, owner_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            completed: input.completed,
            priority: input.priority,
            due_date: input.due_date,
            reminder_time: input.reminder_time,
            owner_id,
        }
    }
}
