// src/repository/news_repository.rs
use crate::domain::news_model::{self, ActiveModel as NewsActiveModel, Entity as NewsEntity};
use crate::domain::news_read_model::{
    self, ActiveModel as NewsReadActiveModel, Entity as NewsReadEntity,
};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, Condition, DbConn, DbErr, DeleteResult, Set};
use uuid::Uuid;

pub struct NewsRepository {
    db: DbConn,
}

impl NewsRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<news_model::Model>, DbErr> {
        NewsEntity::find_by_id(id).one(&self.db).await
    }

    /// マネージャー視点：全記事
    pub async fn find_all(&self) -> Result<Vec<news_model::Model>, DbErr> {
        NewsEntity::find()
            .order_by_desc(news_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// 部門向け記事（"all" 宛は全部門に配信される）
    pub async fn find_for_department(
        &self,
        department: Option<&str>,
    ) -> Result<Vec<news_model::Model>, DbErr> {
        let mut condition = Condition::any().add(news_model::Column::Department.eq("all"));
        if let Some(department) = department {
            condition = condition.add(news_model::Column::Department.eq(department));
        }

        NewsEntity::find()
            .filter(condition)
            .order_by_desc(news_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, news: NewsActiveModel) -> Result<news_model::Model, DbErr> {
        news.insert(&self.db).await
    }

    pub async fn update(&self, news: NewsActiveModel) -> Result<news_model::Model, DbErr> {
        news.update(&self.db).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        NewsEntity::delete_by_id(id).exec(&self.db).await
    }

    /// 既読集合への追加。戻り値は新規に追加されたかどうか
    /// （falseなら既に既読だった）。
    pub async fn mark_read(&self, news_id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let active = NewsReadActiveModel {
            news_id: Set(news_id),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        };

        let rows_affected = NewsReadEntity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    news_read_model::Column::NewsId,
                    news_read_model::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(rows_affected > 0)
    }

    /// 指定ユーザーが既読にした記事IDの集合
    pub async fn read_ids_for_user(&self, user_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let rows = NewsReadEntity::find()
            .filter(news_read_model::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| r.news_id).collect())
    }

    /// ある記事を既読にしたユーザーIDの集合
    pub async fn reader_ids(&self, news_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let rows = NewsReadEntity::find()
            .filter(news_read_model::Column::NewsId.eq(news_id))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| r.user_id).collect())
    }
}
