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

use super::traits::LinkTypeChecker;
use crate::config::checker::CheckerConfig;
use crate::domain::models::link_target::{LinkContext, LINK_TYPE_EXTERNAL};
use crate::domain::models::link_target_response::{
    LinkTargetResponse, ReasonCannotCheck, RedirectHop,
};
use crate::utils::url_utils::preprocess_url;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, LOCATION, RANGE, SERVER, USER_AGENT};
use reqwest::{redirect, Client, Method, StatusCode};
use std::error::Error as _;
use std::time::Duration;
use url::Url;

/// HTTP 状态错误
pub const ERROR_TYPE_HTTP: &str = "http";
/// 连接、DNS、TLS、超时等传输层错误
pub const ERROR_TYPE_NETWORK: &str = "network";
/// 重定向次数超过上限
pub const ERROR_TYPE_REDIRECT: &str = "redirect";
/// 无法解析的URL
pub const ERROR_TYPE_INVALID_URL: &str = "invalid_url";

/// 一次请求（含重定向）的结果
enum FollowOutcome {
    Final {
        status: StatusCode,
        headers: HeaderMap,
        redirects: Vec<RedirectHop>,
    },
    TooManyRedirects(Vec<RedirectHop>),
}

/// 外部链接检查器
///
/// 先发送 HEAD 请求，被拒绝或不支持时回退到带 `Range` 的 GET 请求。
/// 重定向由检查器自己跟随，以便记录完整的跳转链。
pub struct ExternalLinkChecker {
    client: Client,
    user_agent: String,
    timeout: Duration,
    max_redirects: u32,
    range_bytes: u64,
}

#[async_trait]
impl LinkTypeChecker for ExternalLinkChecker {
    async fn check(&self, target: &str, _context: &LinkContext) -> LinkTargetResponse {
        let url = preprocess_url(target);
        if let Err(err) = Url::parse(&url) {
            return LinkTargetResponse::broken(ERROR_TYPE_INVALID_URL, 0)
                .with_message(err.to_string())
                .with_url_checker(self.name());
        }

        let response = match self.follow(Method::HEAD, &url).await {
            Ok(FollowOutcome::Final { status, .. }) if status.as_u16() >= 400 => {
                tracing::debug!("HEAD {} returned {}, retrying with GET", url, status);
                self.check_with_get(&url).await
            }
            Ok(outcome) => classify_outcome(outcome, false),
            Err(err) if err.is_timeout() => network_error(&err),
            Err(err) => {
                tracing::debug!("HEAD {} failed ({}), retrying with GET", url, err);
                self.check_with_get(&url).await
            }
        };

        response.with_url_checker(self.name())
    }

    fn name(&self) -> &str {
        LINK_TYPE_EXTERNAL
    }
}

impl ExternalLinkChecker {
    /// 创建外部链接检查器
    pub fn new(config: &CheckerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout_for(LINK_TYPE_EXTERNAL),
            max_redirects: config.max_redirects,
            range_bytes: config.range_bytes,
        })
    }

    async fn check_with_get(&self, url: &str) -> LinkTargetResponse {
        match self.follow(Method::GET, url).await {
            Ok(outcome) => classify_outcome(outcome, true),
            Err(err) => network_error(&err),
        }
    }

    /// 发送请求并跟随重定向
    async fn follow(&self, method: Method, url: &str) -> Result<FollowOutcome, reqwest::Error> {
        let mut current = url.to_string();
        let mut redirects = Vec::new();

        loop {
            let mut request = self
                .client
                .request(method.clone(), &current)
                .header(USER_AGENT, &self.user_agent)
                .timeout(self.timeout);
            if method == Method::GET {
                request = request.header(RANGE, format!("bytes=0-{}", self.range_bytes));
            }

            let response = request.send().await?;
            let status = response.status();

            if status.is_redirection() {
                let next = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|location| Url::parse(&current).ok()?.join(location).ok());

                if let Some(next) = next {
                    redirects.push(RedirectHop {
                        from: current.clone(),
                        to: next.to_string(),
                    });
                    if redirects.len() > self.max_redirects as usize {
                        return Ok(FollowOutcome::TooManyRedirects(redirects));
                    }
                    current = next.to_string();
                    continue;
                }
            }

            return Ok(FollowOutcome::Final {
                status,
                headers: response.headers().clone(),
                redirects,
            });
        }
    }
}

fn classify_outcome(outcome: FollowOutcome, ranged: bool) -> LinkTargetResponse {
    match outcome {
        FollowOutcome::Final {
            status,
            headers,
            redirects,
        } => classify_status(status, &headers, ranged).with_redirects(redirects),
        FollowOutcome::TooManyRedirects(redirects) => {
            let count = redirects.len() as i64;
            LinkTargetResponse::broken(ERROR_TYPE_REDIRECT, count)
                .with_message(format!("More than {} redirects", count - 1))
                .with_redirects(redirects)
        }
    }
}

/// 按状态码分类
///
/// 429、503 和 Cloudflare 质询页面无法可靠判断，不计为失效
fn classify_status(status: StatusCode, headers: &HeaderMap, ranged: bool) -> LinkTargetResponse {
    if is_cloudflare_challenge(status, headers) {
        return LinkTargetResponse::cannot_check(ReasonCannotCheck::Cloudflare)
            .with_message(status.to_string());
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            LinkTargetResponse::cannot_check(ReasonCannotCheck::TooManyRequests)
                .with_message(status.to_string())
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            LinkTargetResponse::cannot_check(ReasonCannotCheck::ServiceUnavailable)
                .with_message(status.to_string())
        }
        // Ranged GET against an empty resource.
        StatusCode::RANGE_NOT_SATISFIABLE if ranged => LinkTargetResponse::ok(),
        s if s.is_success() || s.is_redirection() || s.is_informational() => LinkTargetResponse::ok(),
        s => LinkTargetResponse::broken(ERROR_TYPE_HTTP, i64::from(s.as_u16()))
            .with_message(s.to_string()),
    }
}

fn is_cloudflare_challenge(status: StatusCode, headers: &HeaderMap) -> bool {
    if headers.contains_key("cf-mitigated") {
        return true;
    }
    let served_by_cloudflare = headers
        .get(SERVER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|server| server.eq_ignore_ascii_case("cloudflare"));
    served_by_cloudflare && status == StatusCode::FORBIDDEN
}

/// 传输层错误，`errno` 取底层系统错误号
fn network_error(err: &reqwest::Error) -> LinkTargetResponse {
    let errno = os_error_code(err).unwrap_or(0);
    let message = if err.is_timeout() {
        "timeout".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        "request failed".to_string()
    };

    LinkTargetResponse::broken(ERROR_TYPE_NETWORK, errno)
        .with_message(message)
        .with_exception_message(error_chain(err))
}

fn os_error_code(err: &reqwest::Error) -> Option<i64> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if let Some(code) = io.raw_os_error() {
                return Some(i64::from(code));
            }
        }
        source = cause.source();
    }
    None
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[path = "external_test.rs"]
mod tests;
