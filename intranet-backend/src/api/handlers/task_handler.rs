// src/api/handlers/task_handler.rs

use crate::api::dto::task_dto::{CreateTaskRequest, UpdateTaskRequest};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;
use validator::Validate;

/// GET /api/tasks/
pub async fn list_tasks_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let tasks = app_state.task_service.list_tasks(&user.claims).await?;
    Ok(ApiResponse::success(tasks))
}

/// POST /api/tasks/
pub async fn create_task_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let created = app_state
        .task_service
        .create_task(&user.claims, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ApiResponse::success(created))))
}

/// GET /api/tasks/{id}/
pub async fn get_task_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let task = app_state.task_service.get_task(&user.claims, id).await?;
    Ok(ApiResponse::success(task))
}

/// PATCH /api/tasks/{id}/
pub async fn update_task_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let updated = app_state
        .task_service
        .update_task(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /api/tasks/{id}/
pub async fn delete_task_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    app_state.task_service.delete_task(&user.claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks/", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}/",
            get(get_task_handler)
                .patch(update_task_handler)
                .delete(delete_task_handler),
        )
}
