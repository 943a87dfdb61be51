// src/api/handlers/kpi_handler.rs

use crate::api::dto::kpi_dto::{KpiListQuery, UpsertKpiRequest};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

/// GET /api/kpis/?period=YYYY-MM
pub async fn list_kpis_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<KpiListQuery>,
) -> AppResult<impl IntoResponse> {
    let kpis = app_state
        .kpi_service
        .list_kpis(&user.claims, query.period)
        .await?;
    Ok(ApiResponse::success(kpis))
}

/// POST /api/kpis/ — (worker, period) キーのアップサート
pub async fn upsert_kpi_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpsertKpiRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let kpi = app_state
        .kpi_service
        .upsert_kpi(&user.claims, payload)
        .await?;

    Ok(ApiResponse::success(kpi))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/kpis/", get(list_kpis_handler).post(upsert_kpi_handler))
}
