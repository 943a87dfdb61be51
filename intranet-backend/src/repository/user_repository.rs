// src/repository/user_repository.rs
use crate::domain::user_model::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult, Order, Set};
use std::collections::HashMap;
use uuid::Uuid;

pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// パスワードリセットの照合用。usernameとemailの両方が一致するユーザーを探す
    pub async fn find_by_username_and_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::Username.eq(username))
            .filter(user_model::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<user_model::Model>, DbErr> {
        UserEntity::find()
            .order_by(user_model::Column::Username, Order::Asc)
            .all(&self.db)
            .await
    }

    pub async fn find_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::Department.eq(department))
            .order_by(user_model::Column::Username, Order::Asc)
            .all(&self.db)
            .await
    }

    /// 直属の部下を取得
    pub async fn find_by_manager(&self, manager_id: Uuid) -> Result<Vec<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::ManagerId.eq(manager_id))
            .order_by(user_model::Column::Username, Order::Asc)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, user: UserActiveModel) -> Result<user_model::Model, DbErr> {
        user.insert(&self.db).await
    }

    pub async fn update(&self, user: UserActiveModel) -> Result<user_model::Model, DbErr> {
        user.update(&self.db).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        UserEntity::delete_by_id(id).exec(&self.db).await
    }

    /// 仮リセットコードを設定（Noneでクリア）
    pub async fn set_temp_reset_code(
        &self,
        id: Uuid,
        code: Option<String>,
    ) -> Result<user_model::Model, DbErr> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {} not found", id)))?;

        let mut active: UserActiveModel = user.into();
        active.temp_reset_code = Set(code);
        active.update(&self.db).await
    }

    /// パスワードハッシュを更新し、仮リセットコードを同時にクリアする
    pub async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> Result<user_model::Model, DbErr> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {} not found", id)))?;

        let mut active: UserActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.temp_reset_code = Set(None);
        active.update(&self.db).await
    }

    /// IDの集合からユーザー名への対応表を引く。DTOの自然キー変換用
    pub async fn usernames_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = UserEntity::find()
            .filter(user_model::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
    }
}
