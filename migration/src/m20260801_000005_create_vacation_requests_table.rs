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
                    .table(VacationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VacationRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VacationRequests::UserId).uuid().not_null())
                    .col(ColumnDef::new(VacationRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(VacationRequests::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(VacationRequests::Period)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(VacationRequests::ReviewReason).text().null())
                    .col(ColumnDef::new(VacationRequests::ReviewedBy).uuid().null())
                    .col(
                        ColumnDef::new(VacationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vacation_requests_user_id")
                            .from(VacationRequests::Table, VacationRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vacation_requests_reviewed_by")
                            .from(VacationRequests::Table, VacationRequests::ReviewedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(VacationRequests::Table)
                    .name("idx_vacation_requests_user_id")
                    .col(VacationRequests::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VacationRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VacationRequests {
    Table,
    Id,
    UserId,
    StartDate,
    EndDate,
    Period,
    Status,
    ReviewReason,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}
