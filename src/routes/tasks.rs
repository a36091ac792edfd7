use crate::{
    auth::{self, TokenIssuer},
    error::AppError,
    models::TaskInput,
    store,
};
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// Retrieves all tasks owned by the authenticated account.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let account = auth::authenticate(&pool, &issuer, &req).await?;

    let tasks = store::tasks::list(&pool, account.id).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated account.
///
/// The owner of the task is always the authenticated account; the payload has
/// no way to say otherwise.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `title`: 1-200 characters (required).
/// - `completed` (optional): defaults to false.
/// - `priority` (optional): one of "low", "medium", "high"; defaults to "medium".
/// - `due_date` (optional): date-like string.
/// - `reminder_time` (optional): date-like string.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If validation on `TaskInput` fails or the priority is
///   not a known value.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    task_data: web::Json<TaskInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let account = auth::authenticate(&pool, &issuer, &req).await?;

    let task = store::tasks::create(&pool, account.id, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Replaces the mutable fields of a task owned by the authenticated account.
///
/// A task that does not exist and a task owned by a different account are
/// both reported as 404; the two cases are indistinguishable on purpose.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to update.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If validation on `TaskInput` fails.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If no task with that id is owned by the caller.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let account = auth::authenticate(&pool, &issuer, &req).await?;

    let task = store::tasks::update(
        &pool,
        account.id,
        task_id.into_inner(),
        task_data.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task owned by the authenticated account.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to delete.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If no task with that id is owned by the caller.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    task_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let account = auth::authenticate(&pool, &issuer, &req).await?;

    store::tasks::delete(&pool, account.id, task_id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
