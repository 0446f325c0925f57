use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 short_url 表
        manager
            .create_table(
                Table::create()
                    .table(ShortUrl::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortUrl::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShortUrl::Url).text().not_null())
                    .col(ColumnDef::new(ShortUrl::HashValue).string_len(10).not_null())
                    .col(ColumnDef::new(ShortUrl::OwnerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ShortUrl::RequestCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShortUrl::ActiveDigest).string_len(64).null())
                    .to_owned(),
            )
            .await?;

        // 活跃 URL 唯一约束：软删除时 active_digest 置 NULL，NULL 之间不冲突
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_short_url_active_digest")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::ActiveDigest)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 解码后按哈希查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_url_hash_value")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::HashValue)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_url_owner_id")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_short_url_owner_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_short_url_hash_value").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("uq_short_url_active_digest").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ShortUrl::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShortUrl {
    #[sea_orm(iden = "short_url")]
    Table,
    Id,
    Url,
    HashValue,
    OwnerId,
    RequestCount,
    ExpiresAt,
    DeletedAt,
    CreatedAt,
    ActiveDigest,
}
