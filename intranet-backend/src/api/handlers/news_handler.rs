// src/api/handlers/news_handler.rs

use crate::api::dto::news_dto::{CreateNewsRequest, UpdateNewsRequest};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use uuid::Uuid;
use validator::Validate;

/// GET /api/news/ — マネージャーは全記事、ワーカーは自部門の未読記事
pub async fn list_news_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let items = app_state.news_service.list_news(&user.claims).await?;
    Ok(ApiResponse::success(items))
}

/// POST /api/news/
pub async fn create_news_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateNewsRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let created = app_state
        .news_service
        .create_news(&user.claims, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ApiResponse::success(created))))
}

/// GET /api/news/archived/ — 既読記事を月ごとにまとめたアーカイブ
pub async fn archived_news_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let groups = app_state.news_service.archived_news(&user.claims).await?;
    Ok(ApiResponse::success(groups))
}

/// GET /api/news/{id}/
pub async fn get_news_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let news = app_state.news_service.get_news(&user.claims, id).await?;
    Ok(ApiResponse::success(news))
}

/// PATCH /api/news/{id}/
pub async fn update_news_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNewsRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let updated = app_state
        .news_service
        .update_news(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /api/news/{id}/
pub async fn delete_news_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    app_state.news_service.delete_news(&user.claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/news/{id}/mark_as_read/ — 冪等な既読化
pub async fn mark_as_read_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let message = app_state
        .news_service
        .mark_as_read(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(message))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news/", get(list_news_handler).post(create_news_handler))
        .route("/news/archived/", get(archived_news_handler))
        .route(
            "/news/{id}/",
            get(get_news_handler)
                .patch(update_news_handler)
                .delete(delete_news_handler),
        )
        .route("/news/{id}/mark_as_read/", post(mark_as_read_handler))
}
