// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// マイグレーションモジュール
mod m20260801_000001_create_users_table;
mod m20260801_000002_create_tasks_table;
mod m20260801_000003_create_promotions_table;

// 申請関連マイグレーション
mod m20260801_000004_create_permission_requests_table;
mod m20260801_000005_create_vacation_requests_table;
mod m20260801_000006_create_shift_change_requests_table;
mod m20260801_000007_create_request_hides_table;

// KPI・ニュース関連マイグレーション
mod m20260801_000008_create_kpis_table;
mod m20260801_000009_create_news_table;
mod m20260801_000010_create_news_reads_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20260801_000001_create_users_table::Migration),
            // 2. usersテーブルに依存するテーブル
            Box::new(m20260801_000002_create_tasks_table::Migration),
            Box::new(m20260801_000003_create_promotions_table::Migration),
            Box::new(m20260801_000004_create_permission_requests_table::Migration),
            Box::new(m20260801_000005_create_vacation_requests_table::Migration),
            Box::new(m20260801_000006_create_shift_change_requests_table::Migration),
            Box::new(m20260801_000007_create_request_hides_table::Migration),
            Box::new(m20260801_000008_create_kpis_table::Migration),
            Box::new(m20260801_000009_create_news_table::Migration),
            Box::new(m20260801_000010_create_news_reads_table::Migration),
        ]
    }
}
