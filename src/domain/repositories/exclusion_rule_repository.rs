// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::exclusion_rule::{ExclusionRule, ExclusionRuleFilter};
use async_trait::async_trait;

/// 排除规则仓库特质
///
/// 核心只读取规则，写入接口仅供管理工具和测试使用
#[async_trait]
pub trait ExclusionRuleRepository: Send + Sync {
    /// 查找可能匹配的规则
    ///
    /// 返回指定链接类型下所有未隐藏的规则；`scope_page_id` 非零时只返回该页面下的规则。
    /// 精确或域名匹配由调用方完成。
    ///
    /// # 参数
    ///
    /// * `link_type` - 链接类型
    /// * `scope_page_id` - 存储页面ID，0 表示不限制
    async fn find_candidates(
        &self,
        link_type: &str,
        scope_page_id: i64,
    ) -> Result<Vec<ExclusionRule>, RepositoryError>;

    /// 按过滤条件列出规则
    async fn list(&self, filter: &ExclusionRuleFilter) -> Result<Vec<ExclusionRule>, RepositoryError>;

    /// 创建规则
    async fn create(&self, rule: &ExclusionRule) -> Result<ExclusionRule, RepositoryError>;
}
