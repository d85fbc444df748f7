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

use crate::domain::models::link_target::LinkContext;
use crate::domain::models::link_target_response::LinkTargetResponse;
use async_trait::async_trait;

/// 目标不存在
pub const ERRNO_NOT_EXISTING: i64 = 1;
/// 目标已删除
pub const ERRNO_DELETED: i64 = 2;
/// 页面锚点指向的内容元素不存在
pub const ERRNO_CONTENT_MISSING: i64 = 3;
/// 目标格式无法解析
pub const ERRNO_INVALID_TARGET: i64 = 4;

/// 链接类型检查器
///
/// 检查器总是返回结果而不是错误：无法判断的情况用 `CANNOT_CHECK` 或 `UNKNOWN` 表示
#[async_trait]
pub trait LinkTypeChecker: Send + Sync {
    /// 检查单个目标
    ///
    /// # 参数
    ///
    /// * `target` - 链接目标
    /// * `context` - 链接所在的上下文记录
    async fn check(&self, target: &str, context: &LinkContext) -> LinkTargetResponse;

    /// 检查器名称，同时写入结果的 `url_checker`
    fn name(&self) -> &str;
}
