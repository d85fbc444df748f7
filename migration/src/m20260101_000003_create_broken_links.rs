// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 失效链接记录表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BrokenLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BrokenLinks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BrokenLinks::RunId).uuid().not_null())
                    .col(ColumnDef::new(BrokenLinks::Url).text().not_null())
                    .col(ColumnDef::new(BrokenLinks::LinkType).string().not_null())
                    .col(
                        ColumnDef::new(BrokenLinks::RecordTable)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BrokenLinks::RecordUid)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BrokenLinks::Field)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BrokenLinks::PageId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(BrokenLinks::CheckStatus).integer().not_null())
                    .col(
                        ColumnDef::new(BrokenLinks::ErrorType)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BrokenLinks::Errno)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BrokenLinks::Message)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(BrokenLinks::UrlResponse).text().not_null())
                    .col(
                        ColumnDef::new(BrokenLinks::LastCheck)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BrokenLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_broken_links_run_status")
                    .table(BrokenLinks::Table)
                    .col(BrokenLinks::RunId)
                    .col(BrokenLinks::CheckStatus)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BrokenLinks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BrokenLinks {
    Table,
    Id,
    RunId,
    Url,
    LinkType,
    RecordTable,
    RecordUid,
    Field,
    PageId,
    CheckStatus,
    ErrorType,
    Errno,
    Message,
    UrlResponse,
    LastCheck,
    CreatedAt,
}
