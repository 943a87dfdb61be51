// src/api/dto/kpi_dto.rs

use crate::domain::kpi_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// KPIアップサートリクエスト（マネージャーのみ）。
/// (worker, period) が既存ならば指定フィールドだけを上書きする。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertKpiRequest {
    #[validate(length(min = 1, message = "Worker is required"))]
    pub worker: String,

    /// "YYYY-MM"。省略時は今月
    pub period: Option<String>,

    pub sales_target: Option<f64>,
    pub sales_achieved: Option<f64>,
    pub warranties_target: Option<i32>,
    pub warranties_achieved: Option<i32>,
    pub financing_target: Option<f64>,
    pub financing_achieved: Option<f64>,
    pub reviews_target: Option<i32>,
    pub reviews_achieved: Option<i32>,
}

/// 一覧取得のクエリパラメータ
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KpiListQuery {
    /// "YYYY-MM"。省略時は今月
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiResponse {
    pub id: Uuid,
    pub worker: String,
    pub period: String,
    pub sales_target: f64,
    pub sales_achieved: f64,
    pub warranties_target: i32,
    pub warranties_achieved: i32,
    pub financing_target: f64,
    pub financing_achieved: f64,
    pub reviews_target: i32,
    pub reviews_achieved: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KpiResponse {
    pub fn from_model(kpi: kpi_model::Model, worker: String, created_by: String) -> Self {
        Self {
            id: kpi.id,
            worker,
            period: kpi.period,
            sales_target: kpi.sales_target,
            sales_achieved: kpi.sales_achieved,
            warranties_target: kpi.warranties_target,
            warranties_achieved: kpi.warranties_achieved,
            financing_target: kpi.financing_target,
            financing_achieved: kpi.financing_achieved,
            reviews_target: kpi.reviews_target,
            reviews_achieved: kpi.reviews_achieved,
            created_by,
            created_at: kpi.created_at,
            updated_at: kpi.updated_at,
        }
    }
}
