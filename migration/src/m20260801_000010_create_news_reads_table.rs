use sea_orm_migration::prelude::*;

use crate::m20260801_000001_create_users_table::Users;
use crate::m20260801_000009_create_news_table::News;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 既読ユーザー集合。複合主キーでmark_as_readを冪等にする。
        manager
            .create_table(
                Table::create()
                    .table(NewsReads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NewsReads::NewsId).uuid().not_null())
                    .col(ColumnDef::new(NewsReads::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(NewsReads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_news_reads")
                            .col(NewsReads::NewsId)
                            .col(NewsReads::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_reads_news_id")
                            .from(NewsReads::Table, NewsReads::NewsId)
                            .to(News::Table, News::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_reads_user_id")
                            .from(NewsReads::Table, NewsReads::UserId)
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
                    .table(NewsReads::Table)
                    .name("idx_news_reads_user_id")
                    .col(NewsReads::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsReads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum NewsReads {
    Table,
    NewsId,
    UserId,
    CreatedAt,
}
