// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::RepositoryError;
use thiserror::Error;

/// 链接检查运行错误
///
/// 单个目标的检查失败不会产生该错误，只会体现在结果状态中
#[derive(Error, Debug)]
pub enum LinkCheckError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("排除规则查询失败: {0}")]
    ExclusionLookup(#[source] RepositoryError),

    #[error("内容仓库错误: {0}")]
    Content(#[source] RepositoryError),

    #[error("检查已取消")]
    Cancelled,
}

impl From<validator::ValidationErrors> for LinkCheckError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LinkCheckError::Configuration(errors.to_string())
    }
}
