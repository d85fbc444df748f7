// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cache_entry::CacheRecord;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 序列化失败
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// 链接目标缓存仓库特质
///
/// 以 `(url, link_type)` 为键保存原始行，过期判断由领域服务完成
#[async_trait]
pub trait LinkTargetCacheRepository: Send + Sync {
    /// 查找缓存行
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(CacheRecord))` - 存在缓存行
    /// * `Ok(None)` - 不存在
    /// * `Err(RepositoryError)` - 查询失败
    async fn find(&self, url: &str, link_type: &str) -> Result<Option<CacheRecord>, RepositoryError>;

    /// 插入或更新缓存行
    async fn upsert(&self, record: &CacheRecord) -> Result<(), RepositoryError>;

    /// 删除缓存行，返回删除的行数
    async fn remove(&self, url: &str, link_type: &str) -> Result<u64, RepositoryError>;

    /// 删除早于指定时间的缓存行
    async fn remove_older_than(&self, last_check: i64) -> Result<u64, RepositoryError>;
}
