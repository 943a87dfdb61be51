// src/api/dto/user_dto.rs

use crate::domain::user_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// ユーザー作成リクエスト（マネージャーのみ）
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be between 3 and 30 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    /// "worker"（デフォルト）または "manager"
    pub role: Option<String>,

    pub department: Option<String>,

    /// 上司のユーザー名
    pub manager: Option<String>,
}

/// ユーザー更新リクエスト（本人またはマネージャー）
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    pub role: Option<String>,

    pub department: Option<String>,

    /// 上司のユーザー名
    pub manager: Option<String>,

    pub is_active: Option<bool>,
}

/// ユーザーレスポンス。上司はユーザー名で返す
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub department: Option<String>,
    pub manager: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_model(user: user_model::Model, manager_username: Option<String>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            department: user.department,
            manager: manager_username,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
