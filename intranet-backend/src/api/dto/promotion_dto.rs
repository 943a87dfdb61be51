// src/api/dto/promotion_dto.rs

use crate::domain::promotion_model;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// キャンペーン作成リクエスト（マネージャーのみ）
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePromotionRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Code must be between 1 and 50 characters"))]
    pub code: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

/// キャンペーン更新リクエスト（マネージャーのみ、部分更新）
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePromotionRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Code must be between 1 and 50 characters"))]
    pub code: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionResponse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl PromotionResponse {
    pub fn from_model(promotion: promotion_model::Model, created_by: String) -> Self {
        Self {
            id: promotion.id,
            name: promotion.name,
            code: promotion.code,
            start_date: promotion.start_date,
            end_date: promotion.end_date,
            created_by,
            created_at: promotion.created_at,
        }
    }
}
