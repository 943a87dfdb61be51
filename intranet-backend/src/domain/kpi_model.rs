// src/domain/kpi_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// 期間ごとの業績指標。(worker_id, period) が自然キーでアップサートされる。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kpis")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub worker_id: Uuid,
    // "YYYY-MM" が慣例だが不透明な文字列として扱う
    pub period: String,
    pub sales_target: f64,
    pub sales_achieved: f64,
    pub warranties_target: i32,
    pub warranties_achieved: i32,
    pub financing_target: f64,
    pub financing_achieved: f64,
    pub reviews_target: i32,
    pub reviews_achieved: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::WorkerId",
        to = "crate::domain::user_model::Column::Id"
    )]
    Worker,

    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::CreatedBy",
        to = "crate::domain::user_model::Column::Id"
    )]
    Creator,
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
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
