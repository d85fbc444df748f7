// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::checker::CacheConfig;
use crate::domain::models::cache_entry::CacheEntry;
use crate::domain::models::link_target_response::LinkTargetResponse;
use crate::domain::repositories::link_target_cache_repository::LinkTargetCacheRepository;
use crate::domain::repositories::RepositoryError;
use chrono::Utc;
use std::sync::Arc;

/// 过期窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryWindow {
    /// 短窗口，用于异步复查
    #[default]
    Low,
    /// 长窗口，用于保存时的同步检查
    High,
}

/// 链接目标缓存服务
///
/// 在仓库之上实现过期判断和结果编解码。无法解码的缓存内容视为未命中。
#[derive(Clone)]
pub struct LinkTargetCache {
    repo: Arc<dyn LinkTargetCacheRepository>,
    config: CacheConfig,
}

impl LinkTargetCache {
    pub fn new(repo: Arc<dyn LinkTargetCacheRepository>, config: CacheConfig) -> Self {
        Self { repo, config }
    }

    /// 窗口对应的过期秒数
    pub fn expire_secs(&self, window: ExpiryWindow) -> i64 {
        match window {
            ExpiryWindow::Low => self.config.expire_low_secs,
            ExpiryWindow::High => self.config.expire_high_secs,
        }
    }

    fn effective_expire(&self, expire_secs: i64) -> i64 {
        if expire_secs == 0 {
            self.config.default_expire_secs
        } else {
            expire_secs
        }
    }

    /// 读取缓存条目，不判断是否过期
    pub async fn find_entry(
        &self,
        target: &str,
        link_type: &str,
    ) -> Result<Option<CacheEntry>, RepositoryError> {
        let Some(record) = self.repo.find(target, link_type).await? else {
            return Ok(None);
        };

        match CacheEntry::from_record(record) {
            Ok(entry) => Ok(Some(entry)),
            Err(err) => {
                tracing::warn!(
                    "Discarding unreadable cache entry for {} ({}): {}",
                    target,
                    link_type,
                    err
                );
                Ok(None)
            }
        }
    }

    /// 判断缓存中是否存在条目
    ///
    /// # 参数
    ///
    /// * `use_expire` - 是否检查过期
    /// * `expire_secs` - 过期秒数，0 表示使用默认值
    pub async fn has_entry(
        &self,
        target: &str,
        link_type: &str,
        use_expire: bool,
        expire_secs: i64,
    ) -> Result<bool, RepositoryError> {
        let Some(record) = self.repo.find(target, link_type).await? else {
            return Ok(false);
        };
        if !use_expire {
            return Ok(true);
        }
        let expire = self.effective_expire(expire_secs);
        let now = Utc::now().timestamp();
        Ok(record.last_check != 0 && record.last_check > now - expire)
    }

    /// 获取未过期的检查结果
    pub async fn get_response(
        &self,
        target: &str,
        link_type: &str,
        expire_secs: i64,
    ) -> Result<Option<LinkTargetResponse>, RepositoryError> {
        let expire = self.effective_expire(expire_secs);
        let now = Utc::now().timestamp();
        Ok(self
            .find_entry(target, link_type)
            .await?
            .filter(|entry| entry.is_fresh(now, expire))
            .map(|entry| entry.response))
    }

    /// 写入检查结果
    pub async fn set_result(
        &self,
        target: &str,
        link_type: &str,
        response: &LinkTargetResponse,
    ) -> Result<(), RepositoryError> {
        let record = CacheEntry::new(target, link_type, response.clone()).to_record()?;
        self.repo.upsert(&record).await
    }

    /// 删除缓存条目
    pub async fn remove(&self, target: &str, link_type: &str) -> Result<u64, RepositoryError> {
        self.repo.remove(target, link_type).await
    }

    /// 清理超过默认过期时间的条目
    pub async fn purge_expired(&self) -> Result<u64, RepositoryError> {
        let cutoff = Utc::now().timestamp() - self.config.default_expire_secs;
        self.repo.remove_older_than(cutoff).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::cache_entry::CacheRecord;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub CacheRepository {}
        #[async_trait]
        impl LinkTargetCacheRepository for CacheRepository {
            async fn find(&self, url: &str, link_type: &str) -> Result<Option<CacheRecord>, RepositoryError>;
            async fn upsert(&self, record: &CacheRecord) -> Result<(), RepositoryError>;
            async fn remove(&self, url: &str, link_type: &str) -> Result<u64, RepositoryError>;
            async fn remove_older_than(&self, last_check: i64) -> Result<u64, RepositoryError>;
        }
    }

    fn record(payload: &str, last_check: i64) -> CacheRecord {
        CacheRecord {
            target: "https://a.test".to_string(),
            link_type: "external".to_string(),
            url_response: payload.to_string(),
            check_status: 1,
            last_check,
        }
    }

    fn cache_returning(record: Option<CacheRecord>) -> LinkTargetCache {
        let mut repo = MockCacheRepository::new();
        repo.expect_find().returning(move |_, _| Ok(record.clone()));
        LinkTargetCache::new(Arc::new(repo), CacheConfig::default())
    }

    #[tokio::test]
    async fn test_stale_entry_is_not_returned() {
        let now = Utc::now().timestamp();
        let payload = r#"{"status":"broken","lastChecked":1,"errorType":"http","errno":404}"#;

        let cache = cache_returning(Some(record(payload, now - 3600)));
        assert!(cache.get_response("https://a.test", "external", 0).await.unwrap().is_some());
        assert!(cache.get_response("https://a.test", "external", 60).await.unwrap().is_none());
        assert!(cache.has_entry("https://a.test", "external", false, 60).await.unwrap());
        assert!(!cache.has_entry("https://a.test", "external", true, 60).await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_last_check_is_never_fresh() {
        let payload = r#"{"status":"ok","lastChecked":0}"#;
        let cache = cache_returning(Some(record(payload, 0)));
        assert!(!cache.has_entry("https://a.test", "external", true, 0).await.unwrap());
        assert!(cache.get_response("https://a.test", "external", 0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_payload_is_a_miss() {
        let now = Utc::now().timestamp();
        let cache = cache_returning(Some(record("not json", now)));
        assert!(cache.get_response("https://a.test", "external", 0).await.unwrap().is_none());
        assert!(cache.find_entry("https://a.test", "external").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_legacy_payload_is_upgraded() {
        let now = Utc::now().timestamp();
        let cache = cache_returning(Some(record(r#"{"valid":false,"errorParams":{"errno":404}}"#, now)));
        let response = cache.get_response("https://a.test", "external", 0).await.unwrap().unwrap();
        assert!(response.is_broken());
        assert_eq!(response.errno(), 404);
    }

    #[tokio::test]
    async fn test_set_result_denormalizes_status() {
        let mut repo = MockCacheRepository::new();
        repo.expect_upsert()
            .withf(|record| record.check_status == 3 && record.link_type == "external")
            .times(1)
            .returning(|_| Ok(()));
        let cache = LinkTargetCache::new(Arc::new(repo), CacheConfig::default());

        let response = LinkTargetResponse::cannot_check(
            crate::domain::models::link_target_response::ReasonCannotCheck::TooManyRequests,
        );
        cache.set_result("https://a.test", "external", &response).await.unwrap();
    }
}
