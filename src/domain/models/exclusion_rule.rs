// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 排除规则匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// 完整目标字符串相等
    #[default]
    Exact,
    /// 仅比较主机名
    Domain,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Domain => write!(f, "domain"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchMode::Exact),
            "domain" => Ok(MatchMode::Domain),
            _ => Err(()),
        }
    }
}

/// 排除规则
///
/// 由外部管理界面维护，核心只读取。命中规则的目标被视为始终有效，不发起网络请求。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    /// 规则ID，新建时为 0
    pub id: i64,
    /// 存储页面ID，0 表示全局规则
    pub scope_page_id: i64,
    /// 链接类型
    pub link_type: String,
    /// 匹配方式
    pub match_mode: MatchMode,
    /// 目标：完整URL（精确匹配）或域名（域名匹配）
    pub target: String,
    /// 排除原因
    pub reason: String,
    /// 隐藏的规则永不匹配
    pub hidden: bool,
}

impl ExclusionRule {
    /// 创建新的排除规则
    pub fn new(link_type: impl Into<String>, match_mode: MatchMode, target: impl Into<String>) -> Self {
        Self {
            id: 0,
            scope_page_id: 0,
            link_type: link_type.into(),
            match_mode,
            target: target.into(),
            reason: String::new(),
            hidden: false,
        }
    }

    pub fn with_scope_page(mut self, scope_page_id: i64) -> Self {
        self.scope_page_id = scope_page_id;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// 判断规则是否匹配目标
    ///
    /// # 参数
    ///
    /// * `target` - 已解码HTML实体的目标
    /// * `hosts` - 目标主机名的各种写法（原始写法和规范化写法），无法解析时为空
    /// * `link_type` - 链接类型
    /// * `scope_page_id` - 作用域页面，0 表示不限制
    pub fn matches(
        &self,
        target: &str,
        hosts: &[&str],
        link_type: &str,
        scope_page_id: i64,
    ) -> bool {
        if self.hidden || self.link_type != link_type {
            return false;
        }
        if scope_page_id != 0 && self.scope_page_id != scope_page_id {
            return false;
        }

        match self.match_mode {
            MatchMode::Exact => self.target == target,
            // Case-sensitive substring match on the host.
            MatchMode::Domain => {
                !self.target.is_empty()
                    && hosts.iter().any(|host| host.contains(self.target.as_str()))
            }
        }
    }
}

/// 排除规则查询过滤条件
#[derive(Debug, Clone, Default)]
pub struct ExclusionRuleFilter {
    pub link_type: Option<String>,
    pub match_mode: Option<MatchMode>,
    /// 限定存储页面
    pub scope_page_id: Option<i64>,
    /// 目标包含的子串
    pub target_contains: Option<String>,
    /// 是否包含隐藏规则
    pub include_hidden: bool,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
