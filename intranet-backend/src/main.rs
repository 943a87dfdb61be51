// src/main.rs
use intranet_backend::api::{create_router, AppState};
use intranet_backend::config::AppConfig;
use intranet_backend::db::create_db_pool;
use intranet_backend::logging::{inject_request_context, logging_middleware};
use intranet_backend::utils::email::EmailService;
use intranet_backend::utils::jwt::JwtManager;
use intranet_backend::utils::password::PasswordManager;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .envがあれば読み込む（なければ無視）
    dotenvy::dotenv().ok();

    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intranet_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting intranet backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env().expect("Failed to load configuration");
    tracing::info!(
        environment = %app_config.environment,
        addr = %app_config.server_addr(),
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created successfully.");

    // マイグレーションを適用
    Migrator::up(&db_pool, None)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied.");

    // 認証・メール関連のコンポーネントを初期化
    let jwt_manager =
        Arc::new(JwtManager::from_env().expect("Failed to initialize JWT manager"));
    let password_manager =
        Arc::new(PasswordManager::from_env().expect("Failed to initialize password manager"));
    let email_service =
        Arc::new(EmailService::from_env().expect("Failed to initialize email service"));

    let state = AppState::new(db_pool, jwt_manager, password_manager, email_service);

    // CORS設定（開発時はフロントエンドのオリジンを許可）
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app_router = create_router(state)
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context))
        .layer(cors);

    let addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
