// src/middleware/auth.rs

use crate::api::AppState;
use crate::domain::user_model::UserClaims;
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// 認証済みユーザー情報。ミドルウェアがリクエスト拡張に格納する
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: UserClaims,
}

impl AuthenticatedUser {
    pub fn new(claims: UserClaims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> uuid::Uuid {
        self.claims.user_id
    }
}

/// Bearerトークンを検証し、クレームをリクエスト拡張に載せる
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(req.headers().get(header::AUTHORIZATION))?;

    let claims = state.jwt_manager.verify_access_token(&token).map_err(|e| {
        warn!(error = %e, "Access token verification failed");
        AppError::from(e)
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser::new(claims.user));

    Ok(next.run(req).await)
}

fn extract_bearer_token(
    header_value: Option<&axum::http::HeaderValue>,
) -> Result<String, AppError> {
    let value = header_value
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
