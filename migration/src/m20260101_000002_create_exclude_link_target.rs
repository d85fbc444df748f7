// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 排除规则表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExcludeLinkTarget::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExcludeLinkTarget::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExcludeLinkTarget::Pid)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .comment("存储页面ID，0 表示全局"),
                    )
                    .col(
                        ColumnDef::new(ExcludeLinkTarget::LinkType)
                            .string()
                            .not_null()
                            .default("external"),
                    )
                    .col(
                        ColumnDef::new(ExcludeLinkTarget::MatchMode)
                            .string()
                            .not_null()
                            .default("exact"),
                    )
                    .col(ColumnDef::new(ExcludeLinkTarget::Linktarget).text().not_null())
                    .col(
                        ColumnDef::new(ExcludeLinkTarget::Reason)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ExcludeLinkTarget::Hidden)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_exclude_link_target_lookup")
                    .table(ExcludeLinkTarget::Table)
                    .col(ExcludeLinkTarget::LinkType)
                    .col(ExcludeLinkTarget::MatchMode)
                    .col(ExcludeLinkTarget::Pid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExcludeLinkTarget::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ExcludeLinkTarget {
    Table,
    Id,
    Pid,
    LinkType,
    MatchMode,
    Linktarget,
    Reason,
    Hidden,
}
