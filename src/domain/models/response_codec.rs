// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::link_target_response::{CheckStatus, LinkTargetResponse};
use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

/// 检查结果解码错误
#[derive(Error, Debug)]
pub enum ResponseDecodeError {
    /// JSON 语法错误或字段类型不匹配
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    /// 负载不是 JSON 对象
    #[error("Payload is not a JSON object")]
    NotAnObject,
    /// 无法识别的负载版本
    #[error("Unrecognized payload schema")]
    UnknownSchema,
    /// 违反结果不变量
    #[error("Invalid response: {0}")]
    Invalid(String),
}

/// 负载版本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadVersion {
    /// 使用 `valid: bool` 的旧格式
    Legacy,
    /// 使用 `status` 的当前格式
    Current,
}

/// 识别负载版本
pub fn detect_version(payload: &Value) -> Option<PayloadVersion> {
    let object = payload.as_object()?;
    if object.contains_key("status") {
        Some(PayloadVersion::Current)
    } else if object.contains_key("valid") {
        Some(PayloadVersion::Legacy)
    } else {
        None
    }
}

/// 序列化为持久化使用的 JSON
pub fn encode(response: &LinkTargetResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string(response)
}

/// 从持久化的 JSON 解码，旧格式负载会被透明升级
pub fn decode(payload: &str) -> Result<LinkTargetResponse, ResponseDecodeError> {
    let value: Value = serde_json::from_str(payload)?;
    if !value.is_object() {
        return Err(ResponseDecodeError::NotAnObject);
    }

    match detect_version(&value) {
        Some(PayloadVersion::Current) => {
            let response: LinkTargetResponse = serde_json::from_value(value)?;
            response.validate().map_err(ResponseDecodeError::Invalid)?;
            // Missing timestamp means "now", as at construction.
            if response.last_checked() == 0 {
                return Ok(response.with_last_checked(Utc::now().timestamp()));
            }
            Ok(response)
        }
        Some(PayloadVersion::Legacy) => upgrade_legacy(&value),
        None => Err(ResponseDecodeError::UnknownSchema),
    }
}

/// 升级旧格式负载
///
/// 旧格式: `{"valid": bool, "lastChecked": int, "errorParams": {"errorType", "errno", "exception", "message"}}`
fn upgrade_legacy(value: &Value) -> Result<LinkTargetResponse, ResponseDecodeError> {
    let valid = value
        .get("valid")
        .and_then(Value::as_bool)
        .ok_or_else(|| ResponseDecodeError::Invalid("'valid' must be a boolean".to_string()))?;
    let last_checked = value.get("lastChecked").and_then(lenient_i64).unwrap_or(0);

    if valid {
        return Ok(LinkTargetResponse::new(CheckStatus::Ok, last_checked));
    }

    let params = value.get("errorParams");
    let field = |name: &str| params.and_then(|p| p.get(name));

    let error_type = field("errorType")
        .and_then(Value::as_str)
        .map(upgrade_error_type)
        .unwrap_or_default();
    let errno = field("errno").and_then(lenient_i64).unwrap_or(0);
    let exception = field("exception")
        .or_else(|| field("exceptionMsg"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let message = field("message")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(LinkTargetResponse::broken(error_type, errno)
        .with_last_checked(last_checked)
        .with_exception_message(exception)
        .with_message(message))
}

/// 旧格式的错误类别名称映射到当前名称
fn upgrade_error_type(legacy: &str) -> String {
    match legacy {
        "httpStatusCode" => "http".to_string(),
        "libcurlErrno" | "network" => "network".to_string(),
        "tooManyRedirects" => "redirect".to_string(),
        other => other.to_string(),
    }
}

// Older payloads stored numbers as strings.
fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
