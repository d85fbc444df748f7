// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use linkwatch::config::settings::DatabaseSettings;
use linkwatch::domain::models::link_target::{LinkContext, LinkTarget};
use linkwatch::infrastructure::database::connection;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 创建已执行迁移的内存数据库
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
    };

    let db = connection::connect_and_migrate(&settings)
        .await
        .expect("Failed to set up in-memory database");
    Arc::new(db)
}

#[allow(dead_code)]
pub fn link(target: &str, link_type: &str, record_uid: i64, page_id: i64) -> LinkTarget {
    LinkTarget::new(
        target,
        link_type,
        LinkContext::new("tt_content", record_uid, "bodytext", page_id),
    )
}
