// src/service/promotion_service.rs

use crate::api::dto::promotion_dto::{
    CreatePromotionRequest, PromotionResponse, UpdatePromotionRequest,
};
use crate::db::DbPool;
use crate::domain::promotion_model;
use crate::domain::user_model::UserClaims;
use crate::error::{AppError, AppResult};
use crate::repository::promotion_repository::PromotionRepository;
use crate::repository::user_repository::UserRepository;
use chrono::Utc;
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct PromotionService {
    promotion_repo: Arc<PromotionRepository>,
    user_repo: Arc<UserRepository>,
}

impl PromotionService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            promotion_repo: Arc::new(PromotionRepository::new(db_pool.clone())),
            user_repo: Arc::new(UserRepository::new(db_pool)),
        }
    }

    /// キャンペーン作成。マネージャーのみ。コードは全体で一意
    pub async fn create_promotion(
        &self,
        caller: &UserClaims,
        payload: CreatePromotionRequest,
    ) -> AppResult<PromotionResponse> {
        caller.ensure_manager("create promotions")?;

        if payload.end_date < payload.start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        if self
            .promotion_repo
            .find_by_code(&payload.code)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Promotion code '{}' already exists",
                payload.code
            )));
        }

        let mut active = promotion_model::ActiveModel::new();
        active.name = Set(payload.name);
        active.code = Set(payload.code);
        active.start_date = Set(payload.start_date);
        active.end_date = Set(payload.end_date);
        active.created_by = Set(caller.user_id);

        let promotion = self.promotion_repo.create(active).await?;

        info!(promotion_id = %promotion.id, created_by = %caller.user_id, "Promotion created");

        self.to_response(promotion).await
    }

    /// 全キャンペーン一覧（全認証ユーザー、開始日の降順）
    pub async fn list_promotions(&self) -> AppResult<Vec<PromotionResponse>> {
        let promotions = self.promotion_repo.find_all().await?;
        self.to_responses(promotions).await
    }

    /// 終了済みキャンペーン一覧（全認証ユーザー）
    pub async fn list_past(&self) -> AppResult<Vec<PromotionResponse>> {
        let today = Utc::now().date_naive();
        let promotions = self.promotion_repo.find_past(today).await?;
        self.to_responses(promotions).await
    }

    pub async fn get_promotion(&self, id: Uuid) -> AppResult<PromotionResponse> {
        let promotion = self
            .promotion_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Promotion {} not found", id)))?;
        self.to_response(promotion).await
    }

    /// キャンペーン更新。マネージャーのみ。日付の前後関係とコードの一意性を再検証する
    pub async fn update_promotion(
        &self,
        caller: &UserClaims,
        id: Uuid,
        payload: UpdatePromotionRequest,
    ) -> AppResult<PromotionResponse> {
        caller.ensure_manager("update promotions")?;

        let existing = self
            .promotion_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Promotion {} not found", id)))?;

        let start_date = payload.start_date.unwrap_or(existing.start_date);
        let end_date = payload.end_date.unwrap_or(existing.end_date);
        if end_date < start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        if let Some(code) = &payload.code {
            if code != &existing.code
                && self.promotion_repo.find_by_code(code).await?.is_some()
            {
                return Err(AppError::Conflict(format!(
                    "Promotion code '{}' already exists",
                    code
                )));
            }
        }

        let mut active: promotion_model::ActiveModel = existing.into();
        if let Some(name) = payload.name {
            active.name = Set(name);
        }
        if let Some(code) = payload.code {
            active.code = Set(code);
        }
        active.start_date = Set(start_date);
        active.end_date = Set(end_date);

        let updated = self.promotion_repo.update(active).await?;

        info!(promotion_id = %updated.id, updated_by = %caller.user_id, "Promotion updated");

        self.to_response(updated).await
    }

    /// キャンペーン削除。マネージャーのみ
    pub async fn delete_promotion(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        caller.ensure_manager("delete promotions")?;

        self.promotion_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Promotion {} not found", id)))?;

        self.promotion_repo.delete_by_id(id).await?;

        info!(promotion_id = %id, deleted_by = %caller.user_id, "Promotion deleted");

        Ok(())
    }

    async fn to_response(&self, promotion: promotion_model::Model) -> AppResult<PromotionResponse> {
        let names = self
            .user_repo
            .usernames_by_ids(&[promotion.created_by])
            .await?;
        let created_by = names.get(&promotion.created_by).cloned().unwrap_or_default();

        Ok(PromotionResponse::from_model(promotion, created_by))
    }

    async fn to_responses(
        &self,
        promotions: Vec<promotion_model::Model>,
    ) -> AppResult<Vec<PromotionResponse>> {
        let creator_ids: Vec<Uuid> = promotions.iter().map(|p| p.created_by).collect();
        let names = self.user_repo.usernames_by_ids(&creator_ids).await?;

        Ok(promotions
            .into_iter()
            .map(|promotion| {
                let created_by = names
                    .get(&promotion.created_by)
                    .cloned()
                    .unwrap_or_default();
                PromotionResponse::from_model(promotion, created_by)
            })
            .collect())
    }
}
