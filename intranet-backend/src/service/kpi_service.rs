// src/service/kpi_service.rs

use crate::api::dto::kpi_dto::{KpiResponse, UpsertKpiRequest};
use crate::db::DbPool;
use crate::domain::kpi_model;
use crate::domain::user_model::UserClaims;
use crate::error::{AppError, AppResult};
use crate::repository::kpi_repository::{KpiMetrics, KpiRepository};
use crate::repository::user_repository::UserRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct KpiService {
    kpi_repo: Arc<KpiRepository>,
    user_repo: Arc<UserRepository>,
}

impl KpiService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            kpi_repo: Arc::new(KpiRepository::new(db_pool.clone())),
            user_repo: Arc::new(UserRepository::new(db_pool)),
        }
    }

    /// (worker, period) をキーにしたアップサート。マネージャーのみ。
    /// 既存レコードがあれば指定フィールドだけを上書きする
    pub async fn upsert_kpi(
        &self,
        caller: &UserClaims,
        payload: UpsertKpiRequest,
    ) -> AppResult<KpiResponse> {
        caller.ensure_manager("manage KPIs")?;

        let worker = self
            .user_repo
            .find_by_username(&payload.worker)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", payload.worker)))?;

        let period = payload.period.unwrap_or_else(current_period);

        let metrics = KpiMetrics {
            sales_target: payload.sales_target,
            sales_achieved: payload.sales_achieved,
            warranties_target: payload.warranties_target,
            warranties_achieved: payload.warranties_achieved,
            financing_target: payload.financing_target,
            financing_achieved: payload.financing_achieved,
            reviews_target: payload.reviews_target,
            reviews_achieved: payload.reviews_achieved,
        };

        let (kpi, created) = self
            .kpi_repo
            .upsert(worker.id, &period, metrics, caller.user_id)
            .await?;

        info!(
            kpi_id = %kpi.id,
            worker_id = %worker.id,
            period = %period,
            created = created,
            "KPI upserted"
        );

        self.to_response(kpi).await
    }

    /// 期間指定の一覧。マネージャーは部下＋自分が作成したレコード、
    /// ワーカーは自分のレコードのみ
    pub async fn list_kpis(
        &self,
        caller: &UserClaims,
        period: Option<String>,
    ) -> AppResult<Vec<KpiResponse>> {
        let period = period.unwrap_or_else(current_period);

        let kpis = if caller.is_manager() {
            let subordinates = self.user_repo.find_by_manager(caller.user_id).await?;
            let subordinate_ids: Vec<Uuid> = subordinates.into_iter().map(|u| u.id).collect();
            self.kpi_repo
                .find_for_manager(&period, &subordinate_ids, caller.user_id)
                .await?
        } else {
            self.kpi_repo.find_for_worker(caller.user_id, &period).await?
        };

        self.to_responses(kpis).await
    }

    async fn to_response(&self, kpi: kpi_model::Model) -> AppResult<KpiResponse> {
        let names = self
            .user_repo
            .usernames_by_ids(&[kpi.worker_id, kpi.created_by])
            .await?;

        let worker = names.get(&kpi.worker_id).cloned().unwrap_or_default();
        let created_by = names.get(&kpi.created_by).cloned().unwrap_or_default();

        Ok(KpiResponse::from_model(kpi, worker, created_by))
    }

    async fn to_responses(&self, kpis: Vec<kpi_model::Model>) -> AppResult<Vec<KpiResponse>> {
        let mut ids: Vec<Uuid> = Vec::new();
        for kpi in &kpis {
            ids.push(kpi.worker_id);
            ids.push(kpi.created_by);
        }
        let names = self.user_repo.usernames_by_ids(&ids).await?;

        Ok(kpis
            .into_iter()
            .map(|kpi| {
                let worker = names.get(&kpi.worker_id).cloned().unwrap_or_default();
                let created_by = names.get(&kpi.created_by).cloned().unwrap_or_default();
                KpiResponse::from_model(kpi, worker, created_by)
            })
            .collect())
    }
}

/// 今月の期間キー（"YYYY-MM"）
fn current_period() -> String {
    Utc::now().format("%Y-%m").to_string()
}
