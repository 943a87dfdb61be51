// src/repository/request_hide_repository.rs
use crate::domain::request_hide_model::{
    self, ActiveModel as RequestHideActiveModel, Entity as RequestHideEntity,
};
use crate::domain::review::RequestKind;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};
use uuid::Uuid;

/// 指定ユーザーが非表示にした申請IDの集合
pub async fn hidden_request_ids(
    db: &DbConn,
    kind: RequestKind,
    user_id: Uuid,
) -> Result<Vec<Uuid>, DbErr> {
    let rows = RequestHideEntity::find()
        .filter(request_hide_model::Column::RequestKind.eq(kind.as_str()))
        .filter(request_hide_model::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|r| r.request_id).collect())
}

pub struct RequestHideRepository {
    db: DbConn,
}

impl RequestHideRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 集合への追加。既に非表示なら何もしない（冪等）
    pub async fn hide(&self, kind: RequestKind, request_id: Uuid, user_id: Uuid) -> Result<(), DbErr> {
        let active = RequestHideActiveModel {
            request_kind: Set(kind.as_str().to_string()),
            request_id: Set(request_id),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        };

        RequestHideEntity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    request_hide_model::Column::RequestKind,
                    request_hide_model::Column::RequestId,
                    request_hide_model::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    /// ある申請を非表示にしているユーザーIDの集合
    pub async fn hider_ids(&self, kind: RequestKind, request_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let rows = RequestHideEntity::find()
            .filter(request_hide_model::Column::RequestKind.eq(kind.as_str()))
            .filter(request_hide_model::Column::RequestId.eq(request_id))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| r.user_id).collect())
    }

    pub async fn hidden_ids_for(
        &self,
        kind: RequestKind,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, DbErr> {
        hidden_request_ids(&self.db, kind, user_id).await
    }
}
