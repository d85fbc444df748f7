// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::broken_link::BrokenLinkRecord;
use super::check_statistics::CheckStatisticsSnapshot;
use super::link_target::LinkTarget;
use super::link_target_response::LinkTargetResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 单个目标的检查结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCheckResult {
    pub link: LinkTarget,
    pub response: LinkTargetResponse,
    /// 结果是否来自缓存
    pub from_cache: bool,
}

/// 检查运行报告，由外部负责格式化和发送
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub run_id: Uuid,
    pub statistics: CheckStatisticsSnapshot,
    pub results: Vec<LinkCheckResult>,
    pub broken_links: Vec<BrokenLinkRecord>,
    /// 运行是否被取消
    pub cancelled: bool,
}

impl CheckReport {
    /// 按 `目标` 分组的检查结果，同一目标可能出现在多个上下文中
    pub fn grouped_by_target(&self) -> BTreeMap<&str, Vec<&LinkCheckResult>> {
        let mut grouped: BTreeMap<&str, Vec<&LinkCheckResult>> = BTreeMap::new();
        for result in &self.results {
            grouped
                .entry(result.link.target.as_str())
                .or_default()
                .push(result);
        }
        grouped
    }
}
