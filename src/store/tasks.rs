use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Task, TaskInput};

const TASK_COLUMNS: &str = "id, title, completed, priority, due_date, reminder_time, owner_id";

/// Returns every task owned by `owner_id`. Never returns another account's
/// tasks; the owner predicate is part of the query itself, not a post-filter.
pub async fn list(pool: &PgPool, owner_id: i32) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE owner_id = $1",
        TASK_COLUMNS
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Persists a new task owned by `owner_id`.
///
/// The input carries no owner field, so the owner cannot be influenced by the
/// caller; it is always the authenticated account.
pub async fn create(pool: &PgPool, owner_id: i32, input: TaskInput) -> Result<Task, AppError> {
    input.validate()?;
    let task = Task::new(input, owner_id);

    let created = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, completed, priority, due_date, reminder_time, owner_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(&task.title)
    .bind(task.completed)
    .bind(task.priority)
    .bind(&task.due_date)
    .bind(&task.reminder_time)
    .bind(task.owner_id)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Replaces the mutable fields of a task owned by `owner_id`.
///
/// The lookup is by id and owner jointly in one statement: a task that exists
/// under a different owner updates zero rows and is reported as `NotFound`,
/// exactly like a task that does not exist at all. The owner column is not in
/// the SET list and can never change here.
pub async fn update(
    pool: &PgPool,
    owner_id: i32,
    task_id: Uuid,
    input: TaskInput,
) -> Result<Task, AppError> {
    input.validate()?;

    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks
         SET title = $1, completed = $2, priority = $3, due_date = $4, reminder_time = $5
         WHERE id = $6 AND owner_id = $7
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.title)
    .bind(input.completed)
    .bind(input.priority)
    .bind(&input.due_date)
    .bind(&input.reminder_time)
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    updated.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Deletes a task owned by `owner_id`.
///
/// Same joint id-and-owner predicate as `update`; deleting an absent task or
/// one owned by someone else is uniformly `NotFound`.
pub async fn delete(pool: &PgPool, owner_id: i32, task_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(task_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(())
}
