// src/api/mod.rs

use crate::db::DbPool;
use crate::middleware::auth::jwt_auth_middleware;
use crate::service::auth_service::AuthService;
use crate::service::kpi_service::KpiService;
use crate::service::news_service::NewsService;
use crate::service::promotion_service::PromotionService;
use crate::service::request_service::{
    PermissionRequestService, ShiftChangeRequestService, VacationRequestService,
};
use crate::service::task_service::TaskService;
use crate::service::user_service::UserService;
use crate::utils::email::EmailService;
use crate::utils::jwt::JwtManager;
use crate::utils::password::PasswordManager;
use axum::{middleware, Router};
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub task_service: Arc<TaskService>,
    pub promotion_service: Arc<PromotionService>,
    pub permission_request_service: Arc<PermissionRequestService>,
    pub vacation_request_service: Arc<VacationRequestService>,
    pub shift_change_request_service: Arc<ShiftChangeRequestService>,
    pub kpi_service: Arc<KpiService>,
    pub news_service: Arc<NewsService>,
    pub jwt_manager: Arc<JwtManager>,
}

impl AppState {
    pub fn new(
        db_pool: DbPool,
        jwt_manager: Arc<JwtManager>,
        password_manager: Arc<PasswordManager>,
        email_service: Arc<EmailService>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                db_pool.clone(),
                password_manager.clone(),
                jwt_manager.clone(),
                email_service,
            )),
            user_service: Arc::new(UserService::new(db_pool.clone(), password_manager)),
            task_service: Arc::new(TaskService::new(db_pool.clone())),
            promotion_service: Arc::new(PromotionService::new(db_pool.clone())),
            permission_request_service: Arc::new(PermissionRequestService::new(db_pool.clone())),
            vacation_request_service: Arc::new(VacationRequestService::new(db_pool.clone())),
            shift_change_request_service: Arc::new(ShiftChangeRequestService::new(db_pool.clone())),
            kpi_service: Arc::new(KpiService::new(db_pool.clone())),
            news_service: Arc::new(NewsService::new(db_pool)),
            jwt_manager,
        }
    }
}

/// 全ルートを組み立てる。/api 配下、認証不要の入口はトークン系のみ
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .merge(handlers::auth_handler::public_router());

    let protected = Router::new()
        .merge(handlers::auth_handler::protected_router())
        .merge(handlers::user_handler::router())
        .merge(handlers::task_handler::router())
        .merge(handlers::promotion_handler::router())
        .merge(handlers::request_handler::router())
        .merge(handlers::kpi_handler::router())
        .merge(handlers::news_handler::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
}
