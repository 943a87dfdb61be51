use sea_orm_migration::prelude::*;

use crate::m20260801_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 3種類の申請テーブルで共有する「非表示にしたユーザー」集合。
        // 複合主キーにより同一ユーザーの二重登録を防ぐ。
        manager
            .create_table(
                Table::create()
                    .table(RequestHides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestHides::RequestKind)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RequestHides::RequestId).uuid().not_null())
                    .col(ColumnDef::new(RequestHides::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(RequestHides::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_request_hides")
                            .col(RequestHides::RequestKind)
                            .col(RequestHides::RequestId)
                            .col(RequestHides::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_hides_user_id")
                            .from(RequestHides::Table, RequestHides::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(RequestHides::Table)
                    .name("idx_request_hides_request")
                    .col(RequestHides::RequestKind)
                    .col(RequestHides::RequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequestHides::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RequestHides {
    Table,
    RequestKind,
    RequestId,
    UserId,
    CreatedAt,
}
