// tests/common/mod.rs
//
// 統合テスト共通のセットアップ。
// インメモリsqliteにマイグレーションを適用して使う。

#![allow(dead_code)]

use intranet_backend::api::AppState;
use intranet_backend::db::DbPool;
use intranet_backend::domain::user_model::{self, UserClaims};
use intranet_backend::domain::user_role::UserRole;
use intranet_backend::service::auth_service::AuthService;
use intranet_backend::utils::email::{EmailConfig, EmailService};
use intranet_backend::utils::jwt::{JwtConfig, JwtManager};
use intranet_backend::utils::password::PasswordManager;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Database, Set};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "Secret123!";

pub async fn setup_db() -> DbPool {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None)
        .await
        .expect("failed to apply migrations");
    db
}

pub struct TestUser {
    pub model: user_model::Model,
    pub claims: UserClaims,
}

impl TestUser {
    pub fn id(&self) -> Uuid {
        self.model.id
    }

    pub fn username(&self) -> &str {
        &self.model.username
    }
}

pub async fn create_user(
    db: &DbPool,
    username: &str,
    role: UserRole,
    department: Option<&str>,
    manager_id: Option<Uuid>,
) -> TestUser {
    let hash = password_manager()
        .hash_password(TEST_PASSWORD)
        .expect("failed to hash fixture password");

    let mut user = user_model::ActiveModel::new();
    user.username = Set(username.to_string());
    user.email = Set(format!("{}@example.com", username));
    user.password_hash = Set(hash);
    user.first_name = Set("Test".to_string());
    user.last_name = Set(username.to_string());
    user.role = Set(role.as_str().to_string());
    user.department = Set(department.map(|d| d.to_string()));
    user.manager_id = Set(manager_id);

    let model = user.insert(db).await.expect("failed to insert fixture user");
    let claims = model.to_claims();

    TestUser { model, claims }
}

pub async fn create_manager(db: &DbPool, username: &str, department: &str) -> TestUser {
    create_user(db, username, UserRole::Manager, Some(department), None).await
}

pub async fn create_worker(
    db: &DbPool,
    username: &str,
    department: &str,
    manager_id: Option<Uuid>,
) -> TestUser {
    create_user(db, username, UserRole::Worker, Some(department), manager_id).await
}

pub fn jwt_manager() -> Arc<JwtManager> {
    Arc::new(JwtManager::new(JwtConfig::default()).expect("failed to build jwt manager"))
}

pub fn password_manager() -> Arc<PasswordManager> {
    Arc::new(PasswordManager::new_default().expect("failed to build password manager"))
}

pub fn email_service() -> Arc<EmailService> {
    // 開発モード：送信はログ出力のみ
    Arc::new(EmailService::new(EmailConfig::default()).expect("failed to build email service"))
}

pub fn auth_service(db: &DbPool) -> AuthService {
    AuthService::new(db.clone(), password_manager(), jwt_manager(), email_service())
}

pub fn app_state(db: &DbPool) -> AppState {
    AppState::new(
        db.clone(),
        jwt_manager(),
        password_manager(),
        email_service(),
    )
}

pub fn bearer_token(user: &TestUser) -> String {
    jwt_manager()
        .generate_access_token(user.claims.clone())
        .expect("failed to sign access token")
}
