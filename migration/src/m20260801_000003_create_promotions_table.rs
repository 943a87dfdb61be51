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
                    .table(Promotions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Promotions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Promotions::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Promotions::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Promotions::StartDate).date().not_null())
                    .col(ColumnDef::new(Promotions::EndDate).date().not_null())
                    .col(ColumnDef::new(Promotions::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Promotions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_promotions_created_by")
                            .from(Promotions::Table, Promotions::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // past一覧はend_dateで絞り込む
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Promotions::Table)
                    .name("idx_promotions_end_date")
                    .col(Promotions::EndDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Promotions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Promotions {
    Table,
    Id,
    Name,
    Code,
    StartDate,
    EndDate,
    CreatedBy,
    CreatedAt,
}
