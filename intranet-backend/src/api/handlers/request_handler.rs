// src/api/handlers/request_handler.rs
//
// レビュー対象申請3種のハンドラ。ルート構成は3種とも同じで、
// approve / reject / modify / hide をサブパスに持つ。

use crate::api::dto::auth_dto::MessageResponse;
use crate::api::dto::request_dto::{
    CreatePermissionRequestDto, CreateShiftChangeRequestDto, CreateVacationRequestDto,
    ModifyPermissionRequestDto, ModifyShiftChangeRequestDto, ModifyVacationRequestDto,
    RejectRequestDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Router,
};
use uuid::Uuid;
use validator::Validate;

// --- 外出許可申請 ---

pub async fn list_permission_requests_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let requests = app_state
        .permission_request_service
        .list(&user.claims)
        .await?;
    Ok(ApiResponse::success(requests))
}

pub async fn create_permission_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreatePermissionRequestDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let created = app_state
        .permission_request_service
        .create(&user.claims, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ApiResponse::success(created))))
}

pub async fn get_permission_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .permission_request_service
        .get(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn approve_permission_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .permission_request_service
        .approve(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn reject_permission_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequestDto>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .permission_request_service
        .reject(&user.claims, id, payload.review_reason)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn modify_permission_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModifyPermissionRequestDto>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .permission_request_service
        .modify(&user.claims, id, payload)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn hide_permission_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    app_state
        .permission_request_service
        .hide(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(MessageResponse {
        message: "Request hidden".to_string(),
    }))
}

// --- 休暇申請 ---

pub async fn list_vacation_requests_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let requests = app_state.vacation_request_service.list(&user.claims).await?;
    Ok(ApiResponse::success(requests))
}

pub async fn create_vacation_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateVacationRequestDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let created = app_state
        .vacation_request_service
        .create(&user.claims, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ApiResponse::success(created))))
}

pub async fn get_vacation_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .vacation_request_service
        .get(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn approve_vacation_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .vacation_request_service
        .approve(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn reject_vacation_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequestDto>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .vacation_request_service
        .reject(&user.claims, id, payload.review_reason)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn modify_vacation_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModifyVacationRequestDto>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .vacation_request_service
        .modify(&user.claims, id, payload)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn hide_vacation_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    app_state
        .vacation_request_service
        .hide(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(MessageResponse {
        message: "Request hidden".to_string(),
    }))
}

// --- シフト交代申請 ---

pub async fn list_shift_change_requests_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<impl IntoResponse> {
    let requests = app_state
        .shift_change_request_service
        .list(&user.claims)
        .await?;
    Ok(ApiResponse::success(requests))
}

pub async fn create_shift_change_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateShiftChangeRequestDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let created = app_state
        .shift_change_request_service
        .create(&user.claims, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ApiResponse::success(created))))
}

pub async fn get_shift_change_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .shift_change_request_service
        .get(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn approve_shift_change_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .shift_change_request_service
        .approve(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn reject_shift_change_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequestDto>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .shift_change_request_service
        .reject(&user.claims, id, payload.review_reason)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn modify_shift_change_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModifyShiftChangeRequestDto>,
) -> AppResult<impl IntoResponse> {
    let request = app_state
        .shift_change_request_service
        .modify(&user.claims, id, payload)
        .await?;
    Ok(ApiResponse::success(request))
}

pub async fn hide_shift_change_request_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    app_state
        .shift_change_request_service
        .hide(&user.claims, id)
        .await?;
    Ok(ApiResponse::success(MessageResponse {
        message: "Request hidden".to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/permission-requests/",
            get(list_permission_requests_handler).post(create_permission_request_handler),
        )
        .route(
            "/permission-requests/{id}/",
            get(get_permission_request_handler),
        )
        .route(
            "/permission-requests/{id}/approve/",
            post(approve_permission_request_handler),
        )
        .route(
            "/permission-requests/{id}/reject/",
            post(reject_permission_request_handler),
        )
        .route(
            "/permission-requests/{id}/modify/",
            patch(modify_permission_request_handler),
        )
        .route(
            "/permission-requests/{id}/hide/",
            post(hide_permission_request_handler),
        )
        .route(
            "/vacation-requests/",
            get(list_vacation_requests_handler).post(create_vacation_request_handler),
        )
        .route(
            "/vacation-requests/{id}/",
            get(get_vacation_request_handler),
        )
        .route(
            "/vacation-requests/{id}/approve/",
            post(approve_vacation_request_handler),
        )
        .route(
            "/vacation-requests/{id}/reject/",
            post(reject_vacation_request_handler),
        )
        .route(
            "/vacation-requests/{id}/modify/",
            patch(modify_vacation_request_handler),
        )
        .route(
            "/vacation-requests/{id}/hide/",
            post(hide_vacation_request_handler),
        )
        .route(
            "/shift-change-requests/",
            get(list_shift_change_requests_handler).post(create_shift_change_request_handler),
        )
        .route(
            "/shift-change-requests/{id}/",
            get(get_shift_change_request_handler),
        )
        .route(
            "/shift-change-requests/{id}/approve/",
            post(approve_shift_change_request_handler),
        )
        .route(
            "/shift-change-requests/{id}/reject/",
            post(reject_shift_change_request_handler),
        )
        .route(
            "/shift-change-requests/{id}/modify/",
            patch(modify_shift_change_request_handler),
        )
        .route(
            "/shift-change-requests/{id}/hide/",
            post(hide_shift_change_request_handler),
        )
}
