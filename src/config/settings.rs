// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::checker::{CacheConfig, CheckerConfig, CrawlDelayConfig, RobotsConfig};
use crate::domain::repositories::content_repository::ContentScope;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use validator::{Validate, ValidationErrors};

/// 应用程序配置设置
///
/// 包含数据库、链接检查、抓取间隔、缓存、robots 和内容来源等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 链接检查配置
    pub link_check: LinkCheckSettings,
    /// 抓取间隔配置
    pub crawl_delay: CrawlDelaySettings,
    /// 缓存配置
    pub cache: CacheSettings,
    /// robots.txt 配置
    pub robots: RobotsSettings,
    /// 内容来源配置
    pub content: ContentSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 链接检查配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LinkCheckSettings {
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 默认请求超时（秒）
    pub timeout_secs: u64,
    /// 按链接类型覆盖的超时（秒）
    #[serde(default)]
    pub linktype_timeouts: HashMap<String, u64>,
    /// 最大重定向次数
    pub max_redirects: u32,
    /// HEAD 失败后范围 GET 请求的字节数
    pub range_bytes: u64,
    /// 启用的链接类型
    pub enabled_link_types: Vec<String>,
    /// 跳过的内容类型
    #[serde(default)]
    pub excluded_content_types: Vec<String>,
    /// 工作池大小
    pub worker_pool_size: usize,
    /// 排除规则存储页面，0 表示全局
    pub exclusion_storage_page: i64,
}

/// 抓取间隔配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlDelaySettings {
    /// 同一域名两次请求之间的最小间隔（秒）
    pub seconds: u64,
    /// 不受间隔限制的域名
    #[serde(default)]
    pub exempt_domains: Vec<String>,
}

/// 缓存配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 短过期窗口（秒），用于异步复查
    pub expire_low_secs: i64,
    /// 长过期窗口（秒），用于保存时的同步检查
    pub expire_high_secs: i64,
    /// 调用方未指定时的默认过期时间（秒）
    pub default_expire_secs: i64,
}

/// robots.txt 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RobotsSettings {
    /// 是否检查 robots.txt
    pub enabled: bool,
    /// 获取超时（秒）
    pub timeout_secs: u64,
    /// 内存缓存时间（秒）
    pub cache_ttl_secs: u64,
    /// 获取失败重试次数
    pub fetch_retries: u32,
}

/// 内容来源配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ContentSettings {
    /// 链接清单文件路径
    pub manifest_path: String,
    /// 检查范围
    #[serde(default)]
    pub scope: ContentScope,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("LINKWATCH")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("link_check.enabled_link_types")
                    .with_list_parse_key("link_check.excluded_content_types")
                    .with_list_parse_key("crawl_delay.exempt_domains")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Default DB settings
            .set_default("database.url", "sqlite://linkwatch.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default link check settings
            .set_default("link_check.user_agent", concat!("linkwatch/", env!("CARGO_PKG_VERSION")))?
            .set_default("link_check.timeout_secs", 10)?
            .set_default("link_check.max_redirects", 5)?
            .set_default("link_check.range_bytes", 4048)?
            .set_default(
                "link_check.enabled_link_types",
                vec!["external", "page", "db", "file"],
            )?
            .set_default("link_check.excluded_content_types", Vec::<String>::new())?
            .set_default("link_check.worker_pool_size", 8)?
            .set_default("link_check.exclusion_storage_page", 0)?
            // Default crawl delay settings
            .set_default("crawl_delay.seconds", 5)?
            .set_default("crawl_delay.exempt_domains", Vec::<String>::new())?
            // Default cache settings
            .set_default("cache.expire_low_secs", 604_800)?
            .set_default("cache.expire_high_secs", 691_200)?
            .set_default("cache.default_expire_secs", 604_800)?
            // Default robots settings
            .set_default("robots.enabled", true)?
            .set_default("robots.timeout_secs", 5)?
            .set_default("robots.cache_ttl_secs", 3600)?
            .set_default("robots.fetch_retries", 2)?
            // Default content settings
            .set_default("content.manifest_path", "links.json")
    }

    /// 只使用内置默认值构建配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?.build()?.try_deserialize()
    }

    /// 转换为链接检查核心使用的不可变配置并校验
    pub fn checker_config(&self) -> Result<CheckerConfig, ValidationErrors> {
        let link_check = &self.link_check;
        let config = CheckerConfig {
            user_agent: link_check.user_agent.clone(),
            timeout: Duration::from_secs(link_check.timeout_secs),
            linktype_timeouts: link_check
                .linktype_timeouts
                .iter()
                .map(|(link_type, secs)| (link_type.clone(), Duration::from_secs(*secs)))
                .collect(),
            max_redirects: link_check.max_redirects,
            range_bytes: link_check.range_bytes,
            enabled_link_types: link_check.enabled_link_types.clone(),
            excluded_content_types: link_check.excluded_content_types.clone(),
            worker_pool_size: link_check.worker_pool_size,
            exclusion_storage_page: link_check.exclusion_storage_page,
            crawl_delay: CrawlDelayConfig {
                seconds: self.crawl_delay.seconds,
                exempt_domains: self.crawl_delay.exempt_domains.clone(),
            },
            cache: CacheConfig {
                expire_low_secs: self.cache.expire_low_secs,
                expire_high_secs: self.cache.expire_high_secs,
                default_expire_secs: self.cache.default_expire_secs,
            },
            robots: RobotsConfig {
                enabled: self.robots.enabled,
                timeout: Duration::from_secs(self.robots.timeout_secs),
                cache_ttl: Duration::from_secs(self.robots.cache_ttl_secs),
                fetch_retries: self.robots.fetch_retries,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_produce_valid_checker_config() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.link_check.timeout_secs, 10);
        assert_eq!(settings.cache.expire_high_secs, 691_200);

        let config = settings.checker_config().unwrap();
        assert_eq!(config.crawl_delay.seconds, 5);
        assert_eq!(config.enabled_link_types, vec!["external", "page", "db", "file"]);
        assert_eq!(config.timeout_for("external"), Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut settings = Settings::defaults().unwrap();
        settings.link_check.worker_pool_size = 0;
        assert!(settings.checker_config().is_err());

        let mut settings = Settings::defaults().unwrap();
        settings.link_check.user_agent = String::new();
        assert!(settings.checker_config().is_err());
    }

    #[test]
    fn test_linktype_timeout_override() {
        let mut settings = Settings::defaults().unwrap();
        settings.link_check.linktype_timeouts.insert("external".to_string(), 3);
        let config = settings.checker_config().unwrap();
        assert_eq!(config.timeout_for("external"), Duration::from_secs(3));
        assert_eq!(config.timeout_for("page"), Duration::from_secs(10));
    }
}
