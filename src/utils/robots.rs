// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::checker::RobotsConfig;
use crate::utils::retry_policy::RetryPolicy;
use crate::utils::url_utils::robots_url;
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::Client;
use robotstxt::DefaultMatcher;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Robots.txt检查器接口
#[async_trait]
pub trait RobotsCheckerTrait: Send + Sync {
    /// 检查URL是否被允许访问
    ///
    /// 获取 robots.txt 失败时视为允许
    async fn is_allowed(&self, url_str: &str, user_agent: &str) -> bool;
}

/// robots.txt 获取错误，只在内部使用
#[derive(Error, Debug)]
enum RobotsError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("server error: {0}")]
    Server(reqwest::StatusCode),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// 缓存的Robots.txt内容
#[derive(Clone)]
struct CachedRobots {
    /// 内容
    content: String,

    /// 过期时间
    expires_at: Instant,
}

/// Robots.txt检查器
#[derive(Clone)]
pub struct RobotsChecker {
    /// HTTP客户端
    client: Client,

    /// 内存缓存
    memory_cache: Arc<DashMap<String, CachedRobots>>,

    /// 重试策略
    retry_policy: RetryPolicy,

    timeout: Duration,
    cache_ttl: Duration,
    enabled: bool,
}

#[async_trait]
impl RobotsCheckerTrait for RobotsChecker {
    async fn is_allowed(&self, url_str: &str, user_agent: &str) -> bool {
        if !self.enabled {
            return true;
        }

        match self.get_robots_content(url_str, user_agent).await {
            Ok(content) => {
                if content.is_empty() {
                    return true;
                }
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(&content, product_token(user_agent), url_str)
            }
            Err(err) => {
                tracing::warn!("Robots check for {} fell back to allowed: {}", url_str, err);
                true
            }
        }
    }
}

impl Default for RobotsChecker {
    fn default() -> Self {
        Self::new(&RobotsConfig::default())
    }
}

impl RobotsChecker {
    /// 创建新的Robots检查器实例
    pub fn new(config: &RobotsConfig) -> Self {
        Self {
            client: Client::new(),
            memory_cache: Arc::new(DashMap::new()),
            retry_policy: RetryPolicy::with_retries(config.fetch_retries),
            timeout: config.timeout,
            cache_ttl: config.cache_ttl,
            enabled: config.enabled,
        }
    }

    /// 获取Robots.txt内容（带缓存）
    ///
    /// 持续失败时返回错误，由调用方回退为允许；失败结果同样会被缓存
    async fn get_robots_content(&self, url_str: &str, user_agent: &str) -> Result<String, RobotsError> {
        let url = Url::parse(url_str).map_err(|_| RobotsError::InvalidUrl(url_str.to_string()))?;
        let robots_url = robots_url(&url).ok_or_else(|| RobotsError::InvalidUrl(url_str.to_string()))?;

        if let Some(cached) = self.memory_cache.get(&robots_url) {
            if cached.expires_at > Instant::now() {
                return Ok(cached.content.clone());
            }
        }
        self.memory_cache.remove(&robots_url);

        let mut attempt = 0;
        let result = loop {
            attempt += 1;
            match self.fetch(&robots_url, user_agent).await {
                Ok(content) => break Ok(content),
                Err(err) if self.retry_policy.should_retry(attempt) => {
                    tracing::debug!("Retrying robots.txt fetch from {}: {}", robots_url, err);
                    tokio::time::sleep(self.retry_policy.calculate_backoff(attempt)).await;
                }
                Err(err) => break Err(err),
            }
        };

        let content = match &result {
            Ok(content) => content.clone(),
            Err(_) => String::new(),
        };
        self.memory_cache.insert(
            robots_url,
            CachedRobots {
                content,
                expires_at: Instant::now() + self.cache_ttl,
            },
        );

        result
    }

    async fn fetch(&self, robots_url: &str, user_agent: &str) -> Result<String, RobotsError> {
        let resp = self
            .client
            .get(robots_url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.text().await?)
        } else if resp.status().is_server_error() {
            Err(RobotsError::Server(resp.status()))
        } else {
            // 404, 403 and friends mean there is no policy to honour
            Ok(String::new())
        }
    }
}

/// robots.txt 匹配使用的产品名，例如 `linkwatch/0.1 (+https://x)` 取 `linkwatch`
fn product_token(user_agent: &str) -> &str {
    let token = user_agent
        .split(|c: char| c == '/' || c.is_whitespace())
        .next()
        .unwrap_or(user_agent);
    if token.is_empty() {
        user_agent
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn checker() -> RobotsChecker {
        RobotsChecker::new(&RobotsConfig {
            fetch_retries: 0,
            ..Default::default()
        })
    }

    #[test]
    fn test_product_token() {
        assert_eq!(product_token("linkwatch/0.1 (+https://example.org)"), "linkwatch");
        assert_eq!(product_token("FooBot"), "FooBot");
    }

    #[tokio::test]
    async fn test_disallowed_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("User-agent: linkwatch\nDisallow: /private\n"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let checker = checker();
        let base = server.uri();
        assert!(!checker.is_allowed(&format!("{}/private/a", base), "linkwatch/0.1").await);
        assert!(checker.is_allowed(&format!("{}/public", base), "linkwatch/0.1").await);
        assert!(checker.is_allowed(&format!("{}/private/a", base), "OtherBot").await);
    }

    #[tokio::test]
    async fn test_missing_robots_allows_everything() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(checker().is_allowed(&format!("{}/anything", server.uri()), "linkwatch").await);
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_allowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let checker = checker();
        assert!(checker.is_allowed(&format!("{}/a", server.uri()), "linkwatch").await);
        // The failed fetch is cached too.
        assert!(checker.is_allowed(&format!("{}/b", server.uri()), "linkwatch").await);
    }

    #[tokio::test]
    async fn test_unreachable_host_falls_back_to_allowed() {
        let checker = checker();
        assert!(checker.is_allowed("http://127.0.0.1:1/page", "linkwatch").await);
    }

    #[tokio::test]
    async fn test_disabled_checker_skips_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
            .expect(0)
            .mount(&server)
            .await;

        let checker = RobotsChecker::new(&RobotsConfig {
            enabled: false,
            ..Default::default()
        });
        assert!(checker.is_allowed(&format!("{}/a", server.uri()), "linkwatch").await);
    }
}
