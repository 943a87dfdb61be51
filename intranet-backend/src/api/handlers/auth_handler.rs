// src/api/handlers/auth_handler.rs

use crate::api::dto::auth_dto::{
    ChangePasswordRequest, MessageResponse, PasswordResetConfirmDto, PasswordResetRequestDto,
    RefreshTokenRequest, RefreshTokenResponse, SigninRequest,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use uuid::Uuid;
use validator::Validate;

/// POST /api/token/
pub async fn signin_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let tokens = app_state
        .auth_service
        .signin(&payload.username, &payload.password)
        .await?;

    Ok(ApiResponse::success(tokens))
}

/// POST /api/token/refresh/
pub async fn refresh_token_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let access = app_state
        .auth_service
        .refresh_access_token(&payload.refresh)
        .await?;

    Ok(ApiResponse::success(RefreshTokenResponse { access }))
}

/// POST /api/password_reset_request/
pub async fn password_reset_request_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<PasswordResetRequestDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    app_state
        .auth_service
        .request_password_reset(&payload.username, &payload.email)
        .await?;

    Ok(ApiResponse::success(MessageResponse {
        message: "Password reset code sent".to_string(),
    }))
}

/// POST /api/password_reset_confirm/
pub async fn password_reset_confirm_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<PasswordResetConfirmDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    app_state
        .auth_service
        .confirm_password_reset(
            &payload.username,
            &payload.email,
            &payload.temp_code,
            &payload.new_password,
        )
        .await?;

    Ok(ApiResponse::success(MessageResponse {
        message: "Password has been reset".to_string(),
    }))
}

/// POST /api/users/{id}/change_password/
pub async fn change_password_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    app_state
        .auth_service
        .change_password(&user.claims, id, &payload.old_password, &payload.new_password)
        .await?;

    Ok(ApiResponse::success(MessageResponse {
        message: "Password changed".to_string(),
    }))
}

/// 認証不要のエンドポイント
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/token/", post(signin_handler))
        .route("/token/refresh/", post(refresh_token_handler))
        .route("/password_reset_request/", post(password_reset_request_handler))
        .route("/password_reset_confirm/", post(password_reset_confirm_handler))
}

/// 認証が必要なエンドポイント
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/users/{id}/change_password/", post(change_password_handler))
}
