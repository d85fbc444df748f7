// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::checker::CrawlDelayConfig;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 抓取间隔控制器
///
/// 保证同一域名两次请求之间至少间隔配置的秒数。
/// 每个域名有独立的锁，读取、等待、写入在锁内完成，同一域名的并发调用会被串行化。
/// 等待结束后同样会刷新访问时间。
pub struct CrawlDelayGovernor {
    delay: Duration,
    exempt_domains: HashSet<String>,
    last_access: DashMap<String, Arc<Mutex<Option<Instant>>>>,
}

impl CrawlDelayGovernor {
    pub fn new(config: &CrawlDelayConfig) -> Self {
        Self {
            delay: Duration::from_secs(config.seconds),
            exempt_domains: config.exempt_domains.iter().cloned().collect(),
            last_access: DashMap::new(),
        }
    }

    fn is_exempt(&self, domain: &str) -> bool {
        domain.is_empty() || self.exempt_domains.contains(domain)
    }

    fn slot(&self, domain: &str) -> Arc<Mutex<Option<Instant>>> {
        self.last_access
            .entry(domain.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// 等待直到可以访问该域名，返回等待的秒数
    pub async fn delay(&self, domain: &str) -> u64 {
        self.delay_or_cancel(domain, &CancellationToken::new()).await
    }

    /// 与 [`delay`](Self::delay) 相同，但等待可被取消
    ///
    /// 被取消时不刷新访问时间
    pub async fn delay_or_cancel(&self, domain: &str, cancel: &CancellationToken) -> u64 {
        if self.is_exempt(domain) {
            return 0;
        }

        let slot = self.slot(domain);
        let mut last_access = slot.lock().await;

        let wait = match *last_access {
            Some(last) => self.delay.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        };

        if wait.is_zero() {
            *last_access = Some(Instant::now());
            return 0;
        }

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                *last_access = Some(Instant::now());
            }
            _ = cancel.cancelled() => {
                tracing::debug!("Crawl delay for {} cancelled", domain);
            }
        }

        let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
        metrics::counter!("linkwatch_crawl_delay_seconds_total").increment(secs);
        secs
    }

    /// 记录一次访问
    ///
    /// 空域名或豁免域名返回 `false` 且不更新状态
    pub async fn record_access(&self, domain: &str) -> bool {
        if self.is_exempt(domain) {
            return false;
        }
        let slot = self.slot(domain);
        *slot.lock().await = Some(Instant::now());
        true
    }
}
