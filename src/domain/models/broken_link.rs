// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::link_target::LinkTarget;
use super::link_target_response::{CheckStatus, LinkTargetResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 失效链接记录
///
/// 每次检查运行中结果为 BROKEN 或 CANNOT_CHECK 的链接都会生成一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokenLinkRecord {
    pub id: Uuid,
    pub run_id: Uuid,
    pub url: String,
    pub link_type: String,
    pub record_table: String,
    pub record_uid: i64,
    pub field: String,
    pub page_id: i64,
    pub check_status: CheckStatus,
    pub error_type: String,
    pub errno: i64,
    pub message: String,
    pub response: LinkTargetResponse,
    pub last_check: i64,
    pub created_at: DateTime<Utc>,
}

impl BrokenLinkRecord {
    /// 判断结果是否需要记录
    pub fn should_record(response: &LinkTargetResponse) -> bool {
        response.is_broken() || response.is_cannot_check()
    }

    pub fn new(run_id: Uuid, link: &LinkTarget, response: &LinkTargetResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            url: link.target.clone(),
            link_type: link.link_type.clone(),
            record_table: link.context.record_table.clone(),
            record_uid: link.context.record_uid,
            field: link.context.field.clone(),
            page_id: link.context.page_id,
            check_status: response.status(),
            error_type: response.error_type().to_string(),
            errno: response.errno(),
            message: response.message().to_string(),
            response: response.clone(),
            last_check: response.last_checked(),
            created_at: Utc::now(),
        }
    }
}
