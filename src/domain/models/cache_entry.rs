// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::link_target_response::LinkTargetResponse;
use super::response_codec::{self, ResponseDecodeError};

/// 缓存条目
///
/// 每个 `(target, link_type)` 只有一条逻辑记录
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub target: String,
    pub link_type: String,
    pub response: LinkTargetResponse,
    /// 最后检查时间（Unix 秒）
    pub last_check: i64,
}

/// 持久化行
///
/// 结果以 JSON 保存，另外冗余保存状态和检查时间以便建立索引
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    pub target: String,
    pub link_type: String,
    pub url_response: String,
    pub check_status: i32,
    pub last_check: i64,
}

impl CacheEntry {
    pub fn new(target: impl Into<String>, link_type: impl Into<String>, response: LinkTargetResponse) -> Self {
        let last_check = response.last_checked();
        Self {
            target: target.into(),
            link_type: link_type.into(),
            response,
            last_check,
        }
    }

    /// 判断条目在过期窗口内是否仍然有效
    ///
    /// `last_check` 为 0 的条目永远视为过期
    pub fn is_fresh(&self, now: i64, expire_secs: i64) -> bool {
        self.last_check != 0 && self.last_check > now - expire_secs
    }

    pub fn to_record(&self) -> Result<CacheRecord, serde_json::Error> {
        Ok(CacheRecord {
            target: self.target.clone(),
            link_type: self.link_type.clone(),
            url_response: response_codec::encode(&self.response)?,
            check_status: self.response.status().code(),
            last_check: self.last_check,
        })
    }

    pub fn from_record(record: CacheRecord) -> Result<Self, ResponseDecodeError> {
        let response = response_codec::decode(&record.url_response)?;
        Ok(Self {
            target: record.target,
            link_type: record.link_type,
            response,
            last_check: record.last_check,
        })
    }
}
