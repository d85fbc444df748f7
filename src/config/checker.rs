// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::time::Duration;
use validator::Validate;

/// 链接检查核心的不可变配置
#[derive(Debug, Clone, Validate)]
pub struct CheckerConfig {
    #[validate(length(min = 1, message = "User agent cannot be empty"))]
    pub user_agent: String,
    pub timeout: Duration,
    pub linktype_timeouts: HashMap<String, Duration>,
    #[validate(range(max = 50))]
    pub max_redirects: u32,
    #[validate(range(min = 1))]
    pub range_bytes: u64,
    #[validate(length(min = 1, message = "At least one link type must be enabled"))]
    pub enabled_link_types: Vec<String>,
    pub excluded_content_types: Vec<String>,
    #[validate(range(min = 1, max = 1024))]
    pub worker_pool_size: usize,
    #[validate(range(min = 0))]
    pub exclusion_storage_page: i64,
    #[validate(nested)]
    pub crawl_delay: CrawlDelayConfig,
    #[validate(nested)]
    pub cache: CacheConfig,
    #[validate(nested)]
    pub robots: RobotsConfig,
}

/// 抓取间隔配置
#[derive(Debug, Clone, Default, Validate)]
pub struct CrawlDelayConfig {
    #[validate(range(max = 3600))]
    pub seconds: u64,
    pub exempt_domains: Vec<String>,
}

/// 缓存过期配置
#[derive(Debug, Clone, Validate)]
pub struct CacheConfig {
    #[validate(range(min = 1))]
    pub expire_low_secs: i64,
    #[validate(range(min = 1))]
    pub expire_high_secs: i64,
    #[validate(range(min = 1))]
    pub default_expire_secs: i64,
}

/// robots.txt 检查配置
#[derive(Debug, Clone, Validate)]
pub struct RobotsConfig {
    pub enabled: bool,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    #[validate(range(max = 10))]
    pub fetch_retries: u32,
}

impl CheckerConfig {
    /// 指定链接类型的请求超时，未覆盖时使用默认值
    pub fn timeout_for(&self, link_type: &str) -> Duration {
        self.linktype_timeouts
            .get(link_type)
            .copied()
            .unwrap_or(self.timeout)
    }

    pub fn is_link_type_enabled(&self, link_type: &str) -> bool {
        self.enabled_link_types.iter().any(|t| t == link_type)
    }

    pub fn is_content_type_excluded(&self, content_type: Option<&str>) -> bool {
        match content_type {
            Some(content_type) => self.excluded_content_types.iter().any(|t| t == content_type),
            None => false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expire_low_secs: 604_800,
            expire_high_secs: 691_200,
            default_expire_secs: 604_800,
        }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(3600),
            fetch_retries: 2,
        }
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("linkwatch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            linktype_timeouts: HashMap::new(),
            max_redirects: 5,
            range_bytes: 4048,
            enabled_link_types: ["external", "page", "db", "file"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            excluded_content_types: Vec::new(),
            worker_pool_size: 8,
            exclusion_storage_page: 0,
            crawl_delay: CrawlDelayConfig {
                seconds: 5,
                exempt_domains: Vec::new(),
            },
            cache: CacheConfig::default(),
            robots: RobotsConfig::default(),
        }
    }
}
