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
                    .table(PermissionRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PermissionRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PermissionRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(PermissionRequests::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PermissionRequests::EndDate).date().not_null())
                    .col(ColumnDef::new(PermissionRequests::Reason).text().not_null())
                    .col(
                        ColumnDef::new(PermissionRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(PermissionRequests::ReviewReason).text().null())
                    .col(ColumnDef::new(PermissionRequests::ReviewedBy).uuid().null())
                    .col(
                        ColumnDef::new(PermissionRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PermissionRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_requests_user_id")
                            .from(PermissionRequests::Table, PermissionRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_requests_reviewed_by")
                            .from(PermissionRequests::Table, PermissionRequests::ReviewedBy)
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
                    .table(PermissionRequests::Table)
                    .name("idx_permission_requests_user_id")
                    .col(PermissionRequests::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PermissionRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PermissionRequests {
    Table,
    Id,
    UserId,
    StartDate,
    EndDate,
    Reason,
    Status,
    ReviewReason,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}
