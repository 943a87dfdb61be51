// src/api/handlers/promotion_handler.rs

use crate::api::dto::promotion_dto::{CreatePromotionRequest, UpdatePromotionRequest};
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

/// GET /api/promotions/ — 全キャンペーン（開始日の降順）
pub async fn list_promotions_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let promotions = app_state.promotion_service.list_promotions().await?;
    Ok(ApiResponse::success(promotions))
}

/// GET /api/promotions/past/ — 終了済みキャンペーン
pub async fn list_past_promotions_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let promotions = app_state.promotion_service.list_past().await?;
    Ok(ApiResponse::success(promotions))
}

/// POST /api/promotions/
pub async fn create_promotion_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreatePromotionRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let created = app_state
        .promotion_service
        .create_promotion(&user.claims, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ApiResponse::success(created))))
}

/// GET /api/promotions/{id}/
pub async fn get_promotion_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let promotion = app_state.promotion_service.get_promotion(id).await?;
    Ok(ApiResponse::success(promotion))
}

/// PATCH /api/promotions/{id}/
pub async fn update_promotion_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePromotionRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let updated = app_state
        .promotion_service
        .update_promotion(&user.claims, id, payload)
        .await?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /api/promotions/{id}/
pub async fn delete_promotion_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    app_state
        .promotion_service
        .delete_promotion(&user.claims, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/promotions/",
            get(list_promotions_handler).post(create_promotion_handler),
        )
        .route("/promotions/past/", get(list_past_promotions_handler))
        .route(
            "/promotions/{id}/",
            get(get_promotion_handler)
                .patch(update_promotion_handler)
                .delete(delete_promotion_handler),
        )
}
