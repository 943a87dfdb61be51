use sea_orm_migration::prelude::*;

use crate::m20260801_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Kpis::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Kpis::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Kpis::WorkerId).uuid().not_null())
                    .col(ColumnDef::new(Kpis::Period).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Kpis::SalesTarget)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Kpis::SalesAchieved)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Kpis::WarrantiesTarget)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Kpis::WarrantiesAchieved)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Kpis::FinancingTarget)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Kpis::FinancingAchieved)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Kpis::ReviewsTarget)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Kpis::ReviewsAchieved)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Kpis::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Kpis::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Kpis::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_kpis_worker_id")
                            .from(Kpis::Table, Kpis::WorkerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_kpis_created_by")
                            .from(Kpis::Table, Kpis::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (worker, period) がアップサートの自然キー
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Kpis::Table)
                    .name("idx_kpis_worker_period")
                    .col(Kpis::WorkerId)
                    .col(Kpis::Period)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Kpis::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Kpis {
    Table,
    Id,
    WorkerId,
    Period,
    SalesTarget,
    SalesAchieved,
    WarrantiesTarget,
    WarrantiesAchieved,
    FinancingTarget,
    FinancingAchieved,
    ReviewsTarget,
    ReviewsAchieved,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
