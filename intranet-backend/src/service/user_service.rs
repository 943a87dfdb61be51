// src/service/user_service.rs

use crate::api::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::db::DbPool;
use crate::domain::user_model::{self, UserClaims};
use crate::domain::user_role::UserRole;
use crate::error::{AppError, AppResult};
use crate::repository::user_repository::UserRepository;
use crate::utils::password::PasswordManager;
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct UserService {
    user_repo: Arc<UserRepository>,
    password_manager: Arc<PasswordManager>,
}

impl UserService {
    pub fn new(db_pool: DbPool, password_manager: Arc<PasswordManager>) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(db_pool)),
            password_manager,
        }
    }

    /// 可視範囲のユーザー一覧。マネージャーは全員、ワーカーは自部門のみ
    pub async fn list_users(&self, caller: &UserClaims) -> AppResult<Vec<UserResponse>> {
        let users = if caller.is_manager() {
            self.user_repo.find_all().await?
        } else {
            match &caller.department {
                Some(department) => self.user_repo.find_by_department(department).await?,
                None => self
                    .user_repo
                    .find_by_id(caller.user_id)
                    .await?
                    .into_iter()
                    .collect(),
            }
        };

        self.to_responses(users).await
    }

    pub async fn get_user(&self, caller: &UserClaims, id: Uuid) -> AppResult<UserResponse> {
        let user = self.find_existing(id).await?;

        if !caller.is_manager()
            && caller.user_id != user.id
            && (caller.department.is_none() || caller.department != user.department)
        {
            return Err(AppError::Forbidden(
                "You are not allowed to view this user".to_string(),
            ));
        }

        self.to_response(user).await
    }

    /// 自分のプロフィール
    pub async fn get_me(&self, caller: &UserClaims) -> AppResult<UserResponse> {
        let user = self.find_existing(caller.user_id).await?;
        self.to_response(user).await
    }

    /// ユーザー作成。マネージャーのみ
    pub async fn create_user(
        &self,
        caller: &UserClaims,
        payload: CreateUserRequest,
    ) -> AppResult<UserResponse> {
        caller.ensure_manager("create users")?;

        if self
            .user_repo
            .find_by_username(&payload.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                payload.username
            )));
        }

        if self.user_repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                payload.email
            )));
        }

        let role = match payload.role.as_deref() {
            None => UserRole::Worker,
            Some(value) => UserRole::from_str(value)
                .ok_or_else(|| AppError::ValidationError(format!("Invalid role: '{}'", value)))?,
        };

        let manager_id = match payload.manager.as_deref() {
            None => None,
            Some(manager_username) => Some(self.resolve_manager(manager_username).await?),
        };

        let password_hash = self.password_manager.hash_password(&payload.password)?;

        let mut active = user_model::ActiveModel::new();
        active.username = Set(payload.username);
        active.email = Set(payload.email);
        active.password_hash = Set(password_hash);
        active.first_name = Set(payload.first_name);
        active.last_name = Set(payload.last_name);
        active.role = Set(role.as_str().to_string());
        active.department = Set(payload.department);
        active.manager_id = Set(manager_id);

        let user = self.user_repo.create(active).await?;

        info!(user_id = %user.id, created_by = %caller.user_id, "User created");

        self.to_response(user).await
    }

    /// ユーザー更新。本人またはマネージャー。
    /// role / is_active の変更はマネージャーのみ
    pub async fn update_user(
        &self,
        caller: &UserClaims,
        id: Uuid,
        payload: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        if !caller.is_manager() && caller.user_id != id {
            return Err(AppError::Forbidden(
                "You can only update your own profile".to_string(),
            ));
        }

        if (payload.role.is_some() || payload.is_active.is_some()) && !caller.is_manager() {
            return Err(AppError::Forbidden(
                "Only managers can change role or active status".to_string(),
            ));
        }

        let user = self.find_existing(id).await?;
        let target_username = user.username.clone();

        let mut active: user_model::ActiveModel = user.into();

        if let Some(email) = payload.email {
            let existing = self.user_repo.find_by_email(&email).await?;
            if existing.as_ref().is_some_and(|u| u.id != id) {
                return Err(AppError::Conflict(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
            active.email = Set(email);
        }
        if let Some(first_name) = payload.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = payload.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(role) = payload.role.as_deref() {
            let role = UserRole::from_str(role)
                .ok_or_else(|| AppError::ValidationError(format!("Invalid role: '{}'", role)))?;
            active.role = Set(role.as_str().to_string());
        }
        if let Some(department) = payload.department {
            active.department = Set(Some(department));
        }
        if let Some(manager_username) = payload.manager.as_deref() {
            // 直接の自己参照だけはここで拒否する
            if manager_username == target_username {
                return Err(AppError::BadRequest(
                    "A user cannot be their own manager".to_string(),
                ));
            }
            let manager_id = self.resolve_manager(manager_username).await?;
            active.manager_id = Set(Some(manager_id));
        }
        if let Some(is_active) = payload.is_active {
            active.is_active = Set(is_active);
        }

        let user = self.user_repo.update(active).await?;

        info!(user_id = %user.id, updated_by = %caller.user_id, "User updated");

        self.to_response(user).await
    }

    /// ユーザー削除。マネージャーのみ
    pub async fn delete_user(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        caller.ensure_manager("delete users")?;

        self.find_existing(id).await?;
        self.user_repo.delete_by_id(id).await?;

        info!(user_id = %id, deleted_by = %caller.user_id, "User deleted");

        Ok(())
    }

    async fn resolve_manager(&self, username: &str) -> AppResult<Uuid> {
        let manager = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;
        Ok(manager.id)
    }

    async fn to_response(&self, user: user_model::Model) -> AppResult<UserResponse> {
        let manager_username = match user.manager_id {
            Some(manager_id) => self
                .user_repo
                .find_by_id(manager_id)
                .await?
                .map(|m| m.username),
            None => None,
        };

        Ok(UserResponse::from_model(user, manager_username))
    }

    async fn to_responses(&self, users: Vec<user_model::Model>) -> AppResult<Vec<UserResponse>> {
        let manager_ids: Vec<Uuid> = users.iter().filter_map(|u| u.manager_id).collect();
        let manager_names = self.user_repo.usernames_by_ids(&manager_ids).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let manager = user.manager_id.and_then(|id| manager_names.get(&id).cloned());
                UserResponse::from_model(user, manager)
            })
            .collect())
    }

    async fn find_existing(&self, id: Uuid) -> AppResult<user_model::Model> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
