//! Task API endpoints
//!
//! RESTful API for task CRUD operations. Every handler resolves the
//! caller's identity first; the resolved user id is the owner id handed
//! to the core on each call.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tt_core::task::{CreateTask, Task, TaskFilter, TaskStatus};
use tt_core::Error as CoreError;

use crate::auth::resolve_user_identity;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
pub struct TaskFilterQuery {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

impl From<TaskFilterQuery> for TaskFilter {
    fn from(query: TaskFilterQuery) -> Self {
        Self {
            status: query.status,
            search: query.search,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type RouteError = (StatusCode, Json<ErrorResponse>);

fn route_error(status: StatusCode, error: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

fn unauthorized(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::UNAUTHORIZED, error)
}

fn bad_request(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::BAD_REQUEST, error)
}

/// Map a core error to a response. Not-found keeps the id; anything else
/// is a generic 500 so storage internals never reach the client.
fn core_error(err: CoreError) -> RouteError {
    match err {
        CoreError::TaskNotFound(id) => {
            route_error(StatusCode::NOT_FOUND, format!("Task {} not found", id))
        }
        err => {
            tracing::error!(error = %err, "task operation failed");
            route_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - List the caller's tasks, optionally filtered
async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TaskFilterQuery>,
) -> Result<Json<Vec<TaskResponse>>, RouteError> {
    let identity = resolve_user_identity(&headers).map_err(unauthorized)?;
    let filter = TaskFilter::from(query);

    let tasks = state
        .tasks()
        .list_tasks(&filter, &identity.user_id)
        .await
        .map_err(core_error)?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), RouteError> {
    let identity = resolve_user_identity(&headers).map_err(unauthorized)?;

    if req.title.trim().is_empty() {
        return Err(bad_request("Title cannot be empty"));
    }

    let new_task = CreateTask {
        title: req.title,
        description: req.description.unwrap_or_default(),
    };

    let created = state
        .tasks()
        .create_task(new_task, &identity.user_id)
        .await
        .map_err(core_error)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(created))))
}

/// GET /api/tasks/:id - Get a single task
async fn get_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, RouteError> {
    let identity = resolve_user_identity(&headers).map_err(unauthorized)?;

    let task = state
        .tasks()
        .get_task(id, &identity.user_id)
        .await
        .map_err(core_error)?;

    Ok(Json(TaskResponse::from(task)))
}

/// PATCH /api/tasks/:id/status - Move a task to a new status
async fn update_task_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskStatusRequest>,
) -> Result<Json<TaskResponse>, RouteError> {
    let identity = resolve_user_identity(&headers).map_err(unauthorized)?;

    let updated = state
        .tasks()
        .update_status(id, req.status, &identity.user_id)
        .await
        .map_err(core_error)?;

    Ok(Json(TaskResponse::from(updated)))
}

/// DELETE /api/tasks/:id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, RouteError> {
    let identity = resolve_user_identity(&headers).map_err(unauthorized)?;

    state
        .tasks()
        .delete_task(id, &identity.user_id)
        .await
        .map_err(core_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", get(get_task).delete(delete_task))
        .route("/api/tasks/{id}/status", patch(update_task_status))
}
