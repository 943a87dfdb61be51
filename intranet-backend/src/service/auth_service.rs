// src/service/auth_service.rs

use crate::db::DbPool;
use crate::domain::user_model::UserClaims;
use crate::error::{AppError, AppResult};
use crate::repository::user_repository::UserRepository;
use crate::utils::email::EmailService;
use crate::utils::jwt::{JwtManager, TokenPair};
use crate::utils::password::{generate_reset_code, PasswordManager};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    password_manager: Arc<PasswordManager>,
    jwt_manager: Arc<JwtManager>,
    email_service: Arc<EmailService>,
}

impl AuthService {
    pub fn new(
        db_pool: DbPool,
        password_manager: Arc<PasswordManager>,
        jwt_manager: Arc<JwtManager>,
        email_service: Arc<EmailService>,
    ) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(db_pool)),
            password_manager,
            jwt_manager,
            email_service,
        }
    }

    /// ユーザー名とパスワードでサインインし、トークンペアを発行する。
    /// 失敗理由は呼び出し元に漏らさない
    pub async fn signin(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let invalid_credentials =
            || AppError::Unauthorized("Invalid username or password".to_string());

        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "Signin failed: unknown username");
                invalid_credentials()
            })?;

        if !user.can_authenticate() {
            warn!(user_id = %user.id, "Signin failed: account inactive");
            return Err(invalid_credentials());
        }

        let verified = self
            .password_manager
            .verify_password(password, &user.password_hash)?;
        if !verified {
            warn!(user_id = %user.id, "Signin failed: wrong password");
            return Err(invalid_credentials());
        }

        let access = self.jwt_manager.generate_access_token(user.to_claims())?;
        let refresh = self.jwt_manager.generate_refresh_token(user.id)?;

        info!(user_id = %user.id, "User signed in");

        Ok(TokenPair { access, refresh })
    }

    /// リフレッシュトークンからアクセストークンを再発行する
    pub async fn refresh_access_token(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self
            .jwt_manager
            .verify_refresh_token(refresh_token)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .filter(|u| u.can_authenticate())
            .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        Ok(self.jwt_manager.generate_access_token(user.to_claims())?)
    }

    /// パスワード変更。本人のみ、現在のパスワードの確認必須
    pub async fn change_password(
        &self,
        caller: &UserClaims,
        target_user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if caller.user_id != target_user_id {
            return Err(AppError::Forbidden(
                "You can only change your own password".to_string(),
            ));
        }

        let user = self
            .user_repo
            .find_by_id(target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", target_user_id)))?;

        let verified = self
            .password_manager
            .verify_password(old_password, &user.password_hash)?;
        if !verified {
            return Err(AppError::BadRequest("Old password is incorrect".to_string()));
        }

        let new_hash = self.password_manager.hash_password(new_password)?;
        self.user_repo.set_password_hash(user.id, new_hash).await?;

        info!(user_id = %user.id, "Password changed");

        Ok(())
    }

    /// パスワードリセット ステップ1：仮コードを発行してメールで送る。
    /// username/emailの組が合わない場合はどちらが違うかを明かさない
    pub async fn request_password_reset(&self, username: &str, email: &str) -> AppResult<()> {
        let user = self
            .user_repo
            .find_by_username_and_email(username, email)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "Password reset request for unknown username/email pair");
                AppError::BadRequest("Invalid username or email".to_string())
            })?;

        let code = generate_reset_code();
        self.user_repo
            .set_temp_reset_code(user.id, Some(code.clone()))
            .await?;

        // メール送信の失敗は呼び出し元に返す（コードは発行済みのまま）
        self.email_service
            .send_password_reset_email(&user.email, &user.username, &code)
            .await?;

        info!(user_id = %user.id, "Password reset code issued");

        Ok(())
    }

    /// パスワードリセット ステップ2：仮コードを検証して新パスワードを設定する。
    /// 成功時にコードは消費される。失敗時はコードを残し、理由を明かさない
    pub async fn confirm_password_reset(
        &self,
        username: &str,
        email: &str,
        temp_code: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let invalid = || AppError::BadRequest("Invalid reset request".to_string());

        let user = self
            .user_repo
            .find_by_username_and_email(username, email)
            .await?
            .ok_or_else(invalid)?;

        match &user.temp_reset_code {
            Some(code) if code == temp_code => {}
            _ => {
                warn!(user_id = %user.id, "Password reset confirm with wrong code");
                return Err(invalid());
            }
        }

        let new_hash = self.password_manager.hash_password(new_password)?;
        // set_password_hash は仮コードも同時にクリアする（ワンタイム性）
        self.user_repo.set_password_hash(user.id, new_hash).await?;

        info!(user_id = %user.id, "Password reset completed");

        Ok(())
    }
}
