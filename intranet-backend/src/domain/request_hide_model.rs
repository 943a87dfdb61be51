// src/domain/request_hide_model.rs
//
// 申請を非表示にしたユーザーの集合。3種類の申請テーブルで共有し、
// request_kind で種別を判別する。複合主キーなので挿入は冪等にできる。

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request_hides")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub request_kind: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub request_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::UserId",
        to = "crate::domain::user_model::Column::Id"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}
