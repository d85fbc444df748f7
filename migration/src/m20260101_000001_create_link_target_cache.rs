// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 链接目标缓存表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LinkTargetCache::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LinkTargetCache::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LinkTargetCache::Url).text().not_null())
                    .col(ColumnDef::new(LinkTargetCache::LinkType).string().not_null())
                    .col(
                        ColumnDef::new(LinkTargetCache::UrlResponse)
                            .text()
                            .not_null()
                            .comment("JSON 序列化的检查结果"),
                    )
                    .col(
                        ColumnDef::new(LinkTargetCache::CheckStatus)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LinkTargetCache::LastCheck)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // One logical row per (url, link_type)
        manager
            .create_index(
                Index::create()
                    .name("idx_link_target_cache_url_type")
                    .table(LinkTargetCache::Table)
                    .col(LinkTargetCache::Url)
                    .col(LinkTargetCache::LinkType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_link_target_cache_status")
                    .table(LinkTargetCache::Table)
                    .col(LinkTargetCache::CheckStatus)
                    .col(LinkTargetCache::LastCheck)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LinkTargetCache::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LinkTargetCache {
    Table,
    Id,
    Url,
    LinkType,
    UrlResponse,
    CheckStatus,
    LastCheck,
}
