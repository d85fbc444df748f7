// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::link_target::LinkTarget;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 内容范围
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentScope {
    /// 限定的页面ID，空表示全部
    #[serde(default)]
    pub page_ids: Vec<i64>,
}

impl ContentScope {
    pub fn includes(&self, page_id: i64) -> bool {
        self.page_ids.is_empty() || self.page_ids.contains(&page_id)
    }
}

/// 页面元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub uid: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// 记录元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInfo {
    pub table: String,
    pub uid: i64,
    #[serde(default)]
    pub page_id: i64,
    #[serde(default)]
    pub deleted: bool,
}

/// 文件元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub identifier: String,
    #[serde(default)]
    pub missing: bool,
}

/// 内容仓库特质
///
/// 链接检查核心不关心内容如何存储，只通过该接口获取链接目标和内部引用的元数据
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// 列出范围内的所有链接目标
    async fn list_link_targets(&self, scope: &ContentScope) -> Result<Vec<LinkTarget>, RepositoryError>;

    /// 查找页面
    async fn find_page(&self, uid: i64) -> Result<Option<PageInfo>, RepositoryError>;

    /// 查找记录
    async fn find_record(&self, table: &str, uid: i64) -> Result<Option<RecordInfo>, RepositoryError>;

    /// 查找文件
    async fn find_file(&self, identifier: &str) -> Result<Option<FileInfo>, RepositoryError>;
}
