// src/api/handlers/user_handler.rs

use crate::api::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
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

/// GET /api/users/
pub async fn list_users_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let users = app_state.user_service.list_users(&user.claims).await?;
    Ok(ApiResponse::success(users))
}

/// POST /api/users/
pub async fn create_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let created = app_state
        .user_service
        .create_user(&user.claims, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ApiResponse::success(created))))
}

/// GET /api/users/me/
pub async fn get_me_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let me = app_state.user_service.get_me(&user.claims).await?;
    Ok(ApiResponse::success(me))
}

/// PATCH /api/users/me/
pub async fn update_me_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let updated = app_state
        .user_service
        .update_user(&user.claims, user.user_id(), payload)
        .await?;

    Ok(ApiResponse::success(updated))
}

/// GET /api/users/{id}/
pub async fn get_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let found = app_state.user_service.get_user(&user.claims, id).await?;
    Ok(ApiResponse::success(found))
}

/// PATCH /api/users/{id}/
pub async fn update_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let updated = app_state
        .user_service
        .update_user(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /api/users/{id}/
pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    app_state.user_service.delete_user(&user.claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", get(list_users_handler).post(create_user_handler))
        .route("/users/me/", get(get_me_handler).patch(update_me_handler))
        .route(
            "/users/{id}/",
            get(get_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
}
