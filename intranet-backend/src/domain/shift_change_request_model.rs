// src/domain/shift_change_request_model.rs
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

use super::review::ReviewStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shift_change_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub requester_id: Uuid,
    // 交代を引き受ける相手。引受者本人にも申請が見える
    pub acceptor_id: Uuid,
    pub date: NaiveDate,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub review_reason: Option<String>,
    #[sea_orm(nullable)]
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::RequesterId",
        to = "crate::domain::user_model::Column::Id"
    )]
    Requester,

    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::AcceptorId",
        to = "crate::domain::user_model::Column::Id"
    )]
    Acceptor,
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            status: Set(ReviewStatus::Pending.as_str().to_string()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

impl Model {
    pub fn status(&self) -> ReviewStatus {
        ReviewStatus::from_str(&self.status).unwrap_or_default()
    }
}
