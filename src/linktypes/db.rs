// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::traits::{LinkTypeChecker, ERRNO_DELETED, ERRNO_INVALID_TARGET, ERRNO_NOT_EXISTING};
use crate::domain::models::link_target::{LinkContext, LINK_TYPE_DB};
use crate::domain::models::link_target_response::LinkTargetResponse;
use crate::domain::repositories::content_repository::ContentRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// 数据库记录链接检查器
///
/// 目标格式为 `<表名>:<uid>`
pub struct DbLinkChecker {
    content: Arc<dyn ContentRepository>,
}

impl DbLinkChecker {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    async fn check_record(&self, target: &str) -> LinkTargetResponse {
        let Some((table, uid)) = target
            .split_once(':')
            .and_then(|(table, uid)| Some((table, uid.parse::<i64>().ok()?)))
            .filter(|(table, _)| !table.is_empty())
        else {
            return LinkTargetResponse::broken(LINK_TYPE_DB, ERRNO_INVALID_TARGET)
                .with_message(format!("Invalid record reference '{}'", target));
        };

        match self.content.find_record(table, uid).await {
            Ok(Some(record)) if record.deleted => {
                LinkTargetResponse::broken(LINK_TYPE_DB, ERRNO_DELETED)
                    .with_message(format!("Record {}:{} was deleted", table, uid))
            }
            Ok(Some(_)) => LinkTargetResponse::ok(),
            Ok(None) => LinkTargetResponse::broken(LINK_TYPE_DB, ERRNO_NOT_EXISTING)
                .with_message(format!("Record {}:{} does not exist", table, uid)),
            Err(err) => LinkTargetResponse::unknown(err.to_string()),
        }
    }
}

#[async_trait]
impl LinkTypeChecker for DbLinkChecker {
    async fn check(&self, target: &str, _context: &LinkContext) -> LinkTargetResponse {
        self.check_record(target).await.with_url_checker(self.name())
    }

    fn name(&self) -> &str {
        LINK_TYPE_DB
    }
}
