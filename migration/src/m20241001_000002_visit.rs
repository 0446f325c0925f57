//! 访问日志表迁移
//!
//! 每次成功跳转追加一条记录，只写不改。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visit::ShortUrlId).big_integer().not_null())
                    .col(ColumnDef::new(Visit::Referrer).text().null())
                    .col(
                        ColumnDef::new(Visit::VisitedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_short_url")
                            .from(Visit::Table, Visit::ShortUrlId)
                            .to(ShortUrl::Table, ShortUrl::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 复合索引（单链接时间序列查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visit_link_time")
                    .table(Visit::Table)
                    .col(Visit::ShortUrlId)
                    .col(Visit::VisitedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_visit_link_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Visit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Visit {
    #[sea_orm(iden = "visit")]
    Table,
    Id,
    ShortUrlId,
    Referrer,
    VisitedAt,
}

#[derive(DeriveIden)]
enum ShortUrl {
    #[sea_orm(iden = "short_url")]
    Table,
    Id,
}
