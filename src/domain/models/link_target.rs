// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 外部链接类型
pub const LINK_TYPE_EXTERNAL: &str = "external";
/// 页面链接类型
pub const LINK_TYPE_PAGE: &str = "page";
/// 数据库记录链接类型
pub const LINK_TYPE_DB: &str = "db";
/// 文件链接类型
pub const LINK_TYPE_FILE: &str = "file";

/// 链接所在的上下文记录
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkContext {
    /// 记录所在表
    pub record_table: String,
    /// 记录ID
    pub record_uid: i64,
    /// 包含链接的字段
    pub field: String,
    /// 记录所在页面
    pub page_id: i64,
    /// 内容类型，用于按配置跳过
    pub content_type: Option<String>,
    /// 链接文本
    pub link_title: Option<String>,
}

/// 待检查的链接目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub target: String,
    pub link_type: String,
    #[serde(default)]
    pub context: LinkContext,
}

impl LinkTarget {
    pub fn new(target: impl Into<String>, link_type: impl Into<String>, context: LinkContext) -> Self {
        Self {
            target: target.into(),
            link_type: link_type.into(),
            context,
        }
    }

    pub fn is_external(&self) -> bool {
        self.link_type == LINK_TYPE_EXTERNAL
    }
}

impl LinkContext {
    pub fn new(record_table: impl Into<String>, record_uid: i64, field: impl Into<String>, page_id: i64) -> Self {
        Self {
            record_table: record_table.into(),
            record_uid,
            field: field.into(),
            page_id,
            content_type: None,
            link_title: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
