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
                    .table(ShiftChangeRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShiftChangeRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShiftChangeRequests::RequesterId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShiftChangeRequests::AcceptorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShiftChangeRequests::Date).date().not_null())
                    .col(ColumnDef::new(ShiftChangeRequests::Reason).text().not_null())
                    .col(
                        ColumnDef::new(ShiftChangeRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ShiftChangeRequests::ReviewReason)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ShiftChangeRequests::ReviewedBy)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ShiftChangeRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ShiftChangeRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_change_requests_requester_id")
                            .from(ShiftChangeRequests::Table, ShiftChangeRequests::RequesterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_change_requests_acceptor_id")
                            .from(ShiftChangeRequests::Table, ShiftChangeRequests::AcceptorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_change_requests_reviewed_by")
                            .from(ShiftChangeRequests::Table, ShiftChangeRequests::ReviewedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 申請者と引受者の両方から参照される
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(ShiftChangeRequests::Table)
                    .name("idx_shift_change_requests_requester_id")
                    .col(ShiftChangeRequests::RequesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(ShiftChangeRequests::Table)
                    .name("idx_shift_change_requests_acceptor_id")
                    .col(ShiftChangeRequests::AcceptorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShiftChangeRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ShiftChangeRequests {
    Table,
    Id,
    RequesterId,
    AcceptorId,
    Date,
    Reason,
    Status,
    ReviewReason,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}
