// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::link_target::LinkTarget;
use crate::domain::repositories::content_repository::{
    ContentRepository, ContentScope, FileInfo, PageInfo, RecordInfo,
};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// 清单文件格式
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    pages: Vec<PageInfo>,
    #[serde(default)]
    records: Vec<RecordInfo>,
    #[serde(default)]
    files: Vec<FileInfo>,
    #[serde(default)]
    links: Vec<LinkTarget>,
}

/// 基于 JSON 清单的内容仓库
///
/// 清单包含 `pages`、`records`、`files` 和 `links` 四个列表，加载后只读
pub struct ManifestContentRepository {
    pages: HashMap<i64, PageInfo>,
    records: HashMap<(String, i64), RecordInfo>,
    files: HashMap<String, FileInfo>,
    links: Vec<LinkTarget>,
}

impl ManifestContentRepository {
    /// 从 JSON 字符串加载清单
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        let manifest: Manifest = serde_json::from_str(json)?;

        Ok(Self {
            pages: manifest.pages.into_iter().map(|p| (p.uid, p)).collect(),
            records: manifest
                .records
                .into_iter()
                .map(|r| ((r.table.clone(), r.uid), r))
                .collect(),
            files: manifest
                .files
                .into_iter()
                .map(|f| (f.identifier.clone(), f))
                .collect(),
            links: manifest.links,
        })
    }
}

#[async_trait]
impl ContentRepository for ManifestContentRepository {
    async fn list_link_targets(&self, scope: &ContentScope) -> Result<Vec<LinkTarget>, RepositoryError> {
        Ok(self
            .links
            .iter()
            .filter(|link| scope.includes(link.context.page_id))
            .cloned()
            .collect())
    }

    async fn find_page(&self, uid: i64) -> Result<Option<PageInfo>, RepositoryError> {
        Ok(self.pages.get(&uid).cloned())
    }

    async fn find_record(&self, table: &str, uid: i64) -> Result<Option<RecordInfo>, RepositoryError> {
        Ok(self.records.get(&(table.to_string(), uid)).cloned())
    }

    async fn find_file(&self, identifier: &str) -> Result<Option<FileInfo>, RepositoryError> {
        Ok(self.files.get(identifier).cloned())
    }
}
