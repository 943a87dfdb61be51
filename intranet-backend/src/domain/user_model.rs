// src/domain/user_model.rs

use super::user_role::UserRole;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    #[serde(skip_serializing)] // パスワードハッシュは絶対にシリアライズしない
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    pub role: String,

    #[sea_orm(nullable)]
    pub department: Option<String>,

    // 上司への自己参照。循環防止はアプリ層で直接自己参照のみ拒否する
    #[sea_orm(nullable)]
    pub manager_id: Option<Uuid>,

    // パスワードリセット用のワンタイムコード。使用後は必ずクリアする
    #[serde(skip_serializing)]
    #[sea_orm(nullable)]
    pub temp_reset_code: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ManagerId",
        to = "Column::Id"
    )]
    Manager,
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            is_active: Set(true),
            role: Set(UserRole::Worker.as_str().to_string()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            // 更新の場合のみ updated_at を更新
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

impl Model {
    pub fn role(&self) -> UserRole {
        UserRole::from_str(&self.role).unwrap_or_default()
    }

    /// ユーザーが認証可能な状態かチェック
    pub fn can_authenticate(&self) -> bool {
        self.is_active
    }

    /// JWTクレーム用のユーザー情報に変換
    pub fn to_claims(&self) -> UserClaims {
        UserClaims {
            user_id: self.id,
            username: self.username.clone(),
            role: self.role(),
            department: self.department.clone(),
        }
    }
}

/// JWT のクレーム用のユーザー情報。
/// 可視性フィルタに必要なロールと部門をトークンに載せる。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub department: Option<String>,
}

impl UserClaims {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    /// マネージャー権限を要求し、なければForbiddenを返す
    pub fn ensure_manager(&self, action: &str) -> Result<(), crate::error::AppError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(crate::error::AppError::Forbidden(format!(
                "Only managers can {}",
                action
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole) -> UserClaims {
        UserClaims {
            user_id: Uuid::new_v4(),
            username: "test".to_string(),
            role,
            department: Some("G1".to_string()),
        }
    }

    #[test]
    fn test_ensure_manager() {
        assert!(claims(UserRole::Manager).ensure_manager("approve requests").is_ok());
        assert!(claims(UserRole::Worker).ensure_manager("approve requests").is_err());
    }
}
