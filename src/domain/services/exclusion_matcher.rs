// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::exclusion_rule::{ExclusionRule, ExclusionRuleFilter};
use crate::domain::repositories::exclusion_rule_repository::ExclusionRuleRepository;
use crate::utils::errors::LinkCheckError;
use crate::utils::url_utils::{extract_domain, raw_host};
use std::sync::Arc;

/// 排除规则匹配服务
///
/// 纯数据查询，不发起网络请求。规则存储不可用时返回错误，不会静默地当作未排除处理。
#[derive(Clone)]
pub struct ExclusionMatcher {
    repo: Arc<dyn ExclusionRuleRepository>,
}

impl ExclusionMatcher {
    pub fn new(repo: Arc<dyn ExclusionRuleRepository>) -> Self {
        Self { repo }
    }

    /// 判断目标是否被排除
    ///
    /// # 参数
    ///
    /// * `target` - 链接目标，可能包含HTML实体
    /// * `link_type` - 链接类型
    /// * `scope_page_id` - 规则存储页面，0 表示全局
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 至少有一条规则匹配
    /// * `Ok(false)` - 没有规则匹配
    /// * `Err(LinkCheckError::ExclusionLookup)` - 规则存储查询失败
    pub async fn is_excluded(
        &self,
        target: &str,
        link_type: &str,
        scope_page_id: i64,
    ) -> Result<bool, LinkCheckError> {
        let target = html_escape::decode_html_entities(target);
        // Rules may store the host as written or in its normalized form.
        let normalized = extract_domain(&target);
        let hosts: Vec<&str> = raw_host(&target)
            .into_iter()
            .chain(normalized.as_deref())
            .collect();

        let candidates = self
            .repo
            .find_candidates(link_type, scope_page_id)
            .await
            .map_err(LinkCheckError::ExclusionLookup)?;

        Ok(candidates
            .iter()
            .any(|rule| rule.matches(&target, &hosts, link_type, scope_page_id)))
    }

    /// 按过滤条件列出规则
    pub async fn list_rules(
        &self,
        filter: &ExclusionRuleFilter,
    ) -> Result<Vec<ExclusionRule>, LinkCheckError> {
        self.repo
            .list(filter)
            .await
            .map_err(LinkCheckError::ExclusionLookup)
    }
}
