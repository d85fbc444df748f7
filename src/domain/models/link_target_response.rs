// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// 检查状态
///
/// 数值编码与持久化层中的 `check_status` 列一致。
/// `All` 仅作为"不过滤"的哨兵值使用，不会出现在检查结果中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// 链接有效
    Ok,
    /// 链接失效
    Broken,
    /// 无法可靠判断
    CannotCheck,
    /// 被排除规则豁免
    Excluded,
    /// 未知
    Unknown,
    /// 不过滤（哨兵值）
    All,
}

impl CheckStatus {
    /// 所有可作为检查结果出现的状态
    pub const RESULTS: [CheckStatus; 5] = [
        CheckStatus::Broken,
        CheckStatus::Ok,
        CheckStatus::CannotCheck,
        CheckStatus::Excluded,
        CheckStatus::Unknown,
    ];

    /// 持久化使用的数值编码
    pub const fn code(self) -> i32 {
        match self {
            CheckStatus::All => -1,
            CheckStatus::Broken => 1,
            CheckStatus::Ok => 2,
            CheckStatus::CannotCheck => 3,
            CheckStatus::Excluded => 4,
            CheckStatus::Unknown => 5,
        }
    }

    /// 从数值编码还原状态
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(CheckStatus::All),
            1 => Some(CheckStatus::Broken),
            2 => Some(CheckStatus::Ok),
            3 => Some(CheckStatus::CannotCheck),
            4 => Some(CheckStatus::Excluded),
            5 => Some(CheckStatus::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "ok"),
            CheckStatus::Broken => write!(f, "broken"),
            CheckStatus::CannotCheck => write!(f, "cannot_check"),
            CheckStatus::Excluded => write!(f, "excluded"),
            CheckStatus::Unknown => write!(f, "unknown"),
            CheckStatus::All => write!(f, "all"),
        }
    }
}

impl FromStr for CheckStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(CheckStatus::Ok),
            "broken" => Ok(CheckStatus::Broken),
            "cannot_check" => Ok(CheckStatus::CannotCheck),
            "excluded" => Ok(CheckStatus::Excluded),
            "unknown" => Ok(CheckStatus::Unknown),
            "all" => Ok(CheckStatus::All),
            _ => Err(()),
        }
    }
}

/// 无法检查的已知原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCannotCheck {
    /// Cloudflare 人机验证页
    #[serde(rename = "cloudflare")]
    Cloudflare,
    /// HTTP 429
    #[serde(rename = "429")]
    TooManyRequests,
    /// HTTP 503
    #[serde(rename = "503")]
    ServiceUnavailable,
    /// robots.txt 禁止访问
    #[serde(rename = "robots_txt")]
    RobotsTxt,
}

impl fmt::Display for ReasonCannotCheck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReasonCannotCheck::Cloudflare => write!(f, "cloudflare"),
            ReasonCannotCheck::TooManyRequests => write!(f, "429"),
            ReasonCannotCheck::ServiceUnavailable => write!(f, "503"),
            ReasonCannotCheck::RobotsTxt => write!(f, "robots_txt"),
        }
    }
}

/// 一次重定向跳转
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectHop {
    pub from: String,
    pub to: String,
}

/// 链接目标检查结果
///
/// 构造后不可变。`with_*` 方法消费自身并返回新值，仅用于构造阶段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTargetResponse {
    status: CheckStatus,
    #[serde(default)]
    last_checked: i64,
    #[serde(default)]
    error_type: String,
    #[serde(default)]
    errno: i64,
    #[serde(default)]
    exception_message: String,
    #[serde(default)]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason_cannot_check: Option<ReasonCannotCheck>,
    #[serde(default)]
    redirects: Vec<RedirectHop>,
    #[serde(default)]
    custom: Map<String, Value>,
    #[serde(default)]
    url_checker: String,
}

impl LinkTargetResponse {
    /// 创建指定状态的结果
    ///
    /// `last_checked` 为 0 时使用当前时间
    pub fn new(status: CheckStatus, last_checked: i64) -> Self {
        Self {
            status,
            last_checked: if last_checked == 0 {
                Utc::now().timestamp()
            } else {
                last_checked
            },
            error_type: String::new(),
            errno: 0,
            exception_message: String::new(),
            message: String::new(),
            reason_cannot_check: None,
            redirects: Vec::new(),
            custom: Map::new(),
            url_checker: String::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(CheckStatus::Ok, 0)
    }

    /// 创建失效结果
    ///
    /// # 参数
    ///
    /// * `error_type` - 错误类别，如 "http"、"network"
    /// * `errno` - 子错误码，如 HTTP 状态码或系统错误号
    pub fn broken(error_type: impl Into<String>, errno: i64) -> Self {
        let mut response = Self::new(CheckStatus::Broken, 0);
        response.error_type = error_type.into();
        response.errno = errno;
        response
    }

    pub fn cannot_check(reason: ReasonCannotCheck) -> Self {
        let mut response = Self::new(CheckStatus::CannotCheck, 0);
        response.reason_cannot_check = Some(reason);
        response
    }

    pub fn excluded() -> Self {
        Self::new(CheckStatus::Excluded, 0)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Unknown, 0).with_message(message)
    }

    pub fn with_last_checked(mut self, last_checked: i64) -> Self {
        if last_checked != 0 {
            self.last_checked = last_checked;
        }
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_exception_message(mut self, exception_message: impl Into<String>) -> Self {
        self.exception_message = exception_message.into();
        self
    }

    /// 附加错误详情（用于无法检查的结果，保留原始HTTP状态）
    pub fn with_error(mut self, error_type: impl Into<String>, errno: i64) -> Self {
        self.error_type = error_type.into();
        self.errno = errno;
        self
    }

    pub fn with_redirects(mut self, redirects: Vec<RedirectHop>) -> Self {
        self.redirects = redirects;
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    pub fn with_url_checker(mut self, url_checker: impl Into<String>) -> Self {
        self.url_checker = url_checker.into();
        self
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    pub fn last_checked(&self) -> i64 {
        self.last_checked
    }

    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    pub fn errno(&self) -> i64 {
        self.errno
    }

    pub fn exception_message(&self) -> &str {
        &self.exception_message
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn reason_cannot_check(&self) -> Option<ReasonCannotCheck> {
        self.reason_cannot_check
    }

    pub fn redirects(&self) -> &[RedirectHop] {
        &self.redirects
    }

    pub fn custom(&self) -> &Map<String, Value> {
        &self.custom
    }

    pub fn url_checker(&self) -> &str {
        &self.url_checker
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }

    pub fn is_broken(&self) -> bool {
        self.status == CheckStatus::Broken
    }

    pub fn is_cannot_check(&self) -> bool {
        self.status == CheckStatus::CannotCheck
    }

    pub fn is_excluded(&self) -> bool {
        self.status == CheckStatus::Excluded
    }

    /// 最后一跳重定向的目标，无重定向时为空
    pub fn effective_url(&self) -> &str {
        self.redirects
            .last()
            .map(|hop| hop.to.as_str())
            .unwrap_or("")
    }

    /// 组合错误标识 `errorType:errno`，用于去重和分类
    pub fn combined_error(&self) -> String {
        format!("{}:{}", self.error_type, self.errno)
    }

    /// 校验状态相关的不变量
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self.status {
            CheckStatus::CannotCheck if self.reason_cannot_check.is_none() => {
                Err("cannot_check response without reason".to_string())
            }
            CheckStatus::All => Err("'all' is not a valid response status".to_string()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_checked_defaults_to_now() {
        let before = Utc::now().timestamp();
        let response = LinkTargetResponse::ok();
        assert!(response.last_checked() >= before);

        let fixed = LinkTargetResponse::new(CheckStatus::Ok, 1_700_000_000);
        assert_eq!(fixed.last_checked(), 1_700_000_000);
    }

    #[test]
    fn test_effective_url_is_last_hop() {
        let response = LinkTargetResponse::ok().with_redirects(vec![
            RedirectHop {
                from: "http://a.test/".to_string(),
                to: "https://a.test/".to_string(),
            },
            RedirectHop {
                from: "https://a.test/".to_string(),
                to: "https://www.a.test/".to_string(),
            },
        ]);
        assert_eq!(response.effective_url(), "https://www.a.test/");
        assert_eq!(LinkTargetResponse::ok().effective_url(), "");
    }

    #[test]
    fn test_combined_error() {
        let response = LinkTargetResponse::broken("http", 404);
        assert_eq!(response.combined_error(), "http:404");
        assert!(response.is_broken());
    }

    #[test]
    fn test_cannot_check_carries_reason() {
        let response = LinkTargetResponse::cannot_check(ReasonCannotCheck::TooManyRequests);
        assert_eq!(
            response.reason_cannot_check(),
            Some(ReasonCannotCheck::TooManyRequests)
        );
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_status_codes_round_trip() {
        for status in CheckStatus::RESULTS {
            assert_eq!(CheckStatus::from_code(status.code()), Some(status));
            assert_eq!(status.to_string().parse::<CheckStatus>(), Ok(status));
        }
        assert_eq!(CheckStatus::from_code(42), None);
    }
}
