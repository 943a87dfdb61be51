// src/repository/kpi_repository.rs
use crate::domain::kpi_model::{self, ActiveModel as KpiActiveModel, Entity as KpiEntity};
use sea_orm::{entity::*, query::*, Condition, DbConn, DbErr, Set, TransactionTrait};
use uuid::Uuid;

/// KPIアップサートの入力。省略したフィールドは既存値を保持する
/// （新規作成時はゼロで初期化）。
#[derive(Debug, Clone, Default)]
pub struct KpiMetrics {
    pub sales_target: Option<f64>,
    pub sales_achieved: Option<f64>,
    pub warranties_target: Option<i32>,
    pub warranties_achieved: Option<i32>,
    pub financing_target: Option<f64>,
    pub financing_achieved: Option<f64>,
    pub reviews_target: Option<i32>,
    pub reviews_achieved: Option<i32>,
}

pub struct KpiRepository {
    db: DbConn,
}

impl KpiRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_worker_and_period(
        &self,
        worker_id: Uuid,
        period: &str,
    ) -> Result<Option<kpi_model::Model>, DbErr> {
        KpiEntity::find()
            .filter(kpi_model::Column::WorkerId.eq(worker_id))
            .filter(kpi_model::Column::Period.eq(period))
            .one(&self.db)
            .await
    }

    /// マネージャー視点：部下のレコードと自分が作成したレコード（期間指定）
    pub async fn find_for_manager(
        &self,
        period: &str,
        subordinate_ids: &[Uuid],
        manager_id: Uuid,
    ) -> Result<Vec<kpi_model::Model>, DbErr> {
        KpiEntity::find()
            .filter(kpi_model::Column::Period.eq(period))
            .filter(
                Condition::any()
                    .add(kpi_model::Column::WorkerId.is_in(subordinate_ids.iter().copied()))
                    .add(kpi_model::Column::CreatedBy.eq(manager_id)),
            )
            .order_by_desc(kpi_model::Column::UpdatedAt)
            .all(&self.db)
            .await
    }

    /// ワーカー視点：自分のレコード（期間指定）
    pub async fn find_for_worker(
        &self,
        worker_id: Uuid,
        period: &str,
    ) -> Result<Vec<kpi_model::Model>, DbErr> {
        KpiEntity::find()
            .filter(kpi_model::Column::WorkerId.eq(worker_id))
            .filter(kpi_model::Column::Period.eq(period))
            .order_by_desc(kpi_model::Column::UpdatedAt)
            .all(&self.db)
            .await
    }

    /// (worker_id, period) をキーにしたアップサート。
    /// 同時実行の重複はUNIQUE制約が最後の防壁になる。
    /// 戻り値のboolは新規作成ならtrue。
    pub async fn upsert(
        &self,
        worker_id: Uuid,
        period: &str,
        metrics: KpiMetrics,
        created_by: Uuid,
    ) -> Result<(kpi_model::Model, bool), DbErr> {
        let txn = self.db.begin().await?;

        let existing = KpiEntity::find()
            .filter(kpi_model::Column::WorkerId.eq(worker_id))
            .filter(kpi_model::Column::Period.eq(period))
            .one(&txn)
            .await?;

        let (model, created) = match existing {
            Some(record) => {
                let mut active: KpiActiveModel = record.into();
                apply_metrics(&mut active, &metrics);
                (active.update(&txn).await?, false)
            }
            None => {
                let mut active = KpiActiveModel::new();
                active.worker_id = Set(worker_id);
                active.period = Set(period.to_string());
                active.created_by = Set(created_by);
                active.sales_target = Set(metrics.sales_target.unwrap_or_default());
                active.sales_achieved = Set(metrics.sales_achieved.unwrap_or_default());
                active.warranties_target = Set(metrics.warranties_target.unwrap_or_default());
                active.warranties_achieved = Set(metrics.warranties_achieved.unwrap_or_default());
                active.financing_target = Set(metrics.financing_target.unwrap_or_default());
                active.financing_achieved = Set(metrics.financing_achieved.unwrap_or_default());
                active.reviews_target = Set(metrics.reviews_target.unwrap_or_default());
                active.reviews_achieved = Set(metrics.reviews_achieved.unwrap_or_default());
                (active.insert(&txn).await?, true)
            }
        };

        txn.commit().await?;
        Ok((model, created))
    }
}

/// 指定されたフィールドだけを上書きする
fn apply_metrics(active: &mut KpiActiveModel, metrics: &KpiMetrics) {
    if let Some(v) = metrics.sales_target {
        active.sales_target = Set(v);
    }
    if let Some(v) = metrics.sales_achieved {
        active.sales_achieved = Set(v);
    }
    if let Some(v) = metrics.warranties_target {
        active.warranties_target = Set(v);
    }
    if let Some(v) = metrics.warranties_achieved {
        active.warranties_achieved = Set(v);
    }
    if let Some(v) = metrics.financing_target {
        active.financing_target = Set(v);
    }
    if let Some(v) = metrics.financing_achieved {
        active.financing_achieved = Set(v);
    }
    if let Some(v) = metrics.reviews_target {
        active.reviews_target = Set(v);
    }
    if let Some(v) = metrics.reviews_achieved {
        active.reviews_achieved = Set(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn base_active() -> KpiActiveModel {
        KpiActiveModel {
            id: Set(Uuid::new_v4()),
            worker_id: Set(Uuid::new_v4()),
            period: Set("2026-08".to_string()),
            sales_target: Set(100.0),
            sales_achieved: Set(50.0),
            warranties_target: Set(10),
            warranties_achieved: Set(5),
            financing_target: Set(20.0),
            financing_achieved: Set(10.0),
            reviews_target: Set(8),
            reviews_achieved: Set(4),
            created_by: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
    }

    #[test]
    fn test_apply_metrics_overwrites_only_provided_fields() {
        let mut active = base_active();
        let metrics = KpiMetrics {
            sales_achieved: Some(75.0),
            reviews_achieved: Some(6),
            ..Default::default()
        };

        apply_metrics(&mut active, &metrics);

        assert_eq!(active.sales_achieved, ActiveValue::Set(75.0));
        assert_eq!(active.reviews_achieved, ActiveValue::Set(6));
        // 指定しなかったフィールドは据え置き
        assert_eq!(active.sales_target, ActiveValue::Set(100.0));
        assert_eq!(active.warranties_achieved, ActiveValue::Set(5));
    }

    #[test]
    fn test_apply_metrics_with_empty_patch_changes_nothing() {
        let mut active = base_active();
        apply_metrics(&mut active, &KpiMetrics::default());
        assert_eq!(active.sales_target, ActiveValue::Set(100.0));
        assert_eq!(active.reviews_achieved, ActiveValue::Set(4));
    }
}
