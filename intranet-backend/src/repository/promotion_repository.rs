// src/repository/promotion_repository.rs
use crate::domain::promotion_model::{
    self, ActiveModel as PromotionActiveModel, Entity as PromotionEntity,
};
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult};
use uuid::Uuid;

pub struct PromotionRepository {
    db: DbConn,
}

impl PromotionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<promotion_model::Model>, DbErr> {
        PromotionEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<promotion_model::Model>, DbErr> {
        PromotionEntity::find()
            .filter(promotion_model::Column::Code.eq(code))
            .one(&self.db)
            .await
    }

    /// 全キャンペーン（開始日の降順）
    pub async fn find_all(&self) -> Result<Vec<promotion_model::Model>, DbErr> {
        PromotionEntity::find()
            .order_by_desc(promotion_model::Column::StartDate)
            .all(&self.db)
            .await
    }

    /// 終了済みキャンペーン（終了日が今日より前）
    pub async fn find_past(&self, today: NaiveDate) -> Result<Vec<promotion_model::Model>, DbErr> {
        PromotionEntity::find()
            .filter(promotion_model::Column::EndDate.lt(today))
            .order_by_desc(promotion_model::Column::StartDate)
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        promotion: PromotionActiveModel,
    ) -> Result<promotion_model::Model, DbErr> {
        promotion.insert(&self.db).await
    }

    pub async fn update(
        &self,
        promotion: PromotionActiveModel,
    ) -> Result<promotion_model::Model, DbErr> {
        promotion.update(&self.db).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        PromotionEntity::delete_by_id(id).exec(&self.db).await
    }
}
