use crate::{
    auth::AuthenticatedUserId, error::AppError, models::TaskInput, services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, oldest first.
/// - `401 Unauthorized`: Missing or invalid bearer token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list_mine(user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The owner is always the caller; a `user_id` in the body is ignored.
/// `status` defaults to `"Pending"`.
///
/// ## Responses:
/// - `201 Created`: The created `Task`.
/// - `400 Bad Request`: Malformed body or empty title.
/// - `401 Unauthorized`: Missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUserId,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(task_data.into_inner(), user.0).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: No such task, or it belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUserId,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get_by_id(task_id.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Replaces title, description and status of one of the user's tasks.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `400 Bad Request`: Malformed body, bad id or empty title.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: No such task, or it belongs to another user.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUserId,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .update(task_id.into_inner(), task_data.into_inner(), user.0)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Soft-deletes one of the user's tasks.
///
/// ## Responses:
/// - `204 No Content`: Deleted.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: No such task, already deleted, or it belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUserId,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    tasks.delete(task_id.into_inner(), user.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
