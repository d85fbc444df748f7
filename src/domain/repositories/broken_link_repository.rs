// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::broken_link::BrokenLinkRecord;
use crate::domain::models::link_target_response::CheckStatus;
use async_trait::async_trait;
use uuid::Uuid;

/// 失效链接仓库特质
#[async_trait]
pub trait BrokenLinkRepository: Send + Sync {
    /// 保存失效链接记录
    async fn create(&self, record: &BrokenLinkRecord) -> Result<BrokenLinkRecord, RepositoryError>;

    /// 列出某次运行的失效链接
    ///
    /// # 参数
    ///
    /// * `run_id` - 运行ID
    /// * `status` - 状态过滤，`CheckStatus::All` 表示不过滤
    async fn list_by_run(
        &self,
        run_id: Uuid,
        status: CheckStatus,
    ) -> Result<Vec<BrokenLinkRecord>, RepositoryError>;

    /// 删除某次运行之前的所有记录
    async fn delete_except_run(&self, run_id: Uuid) -> Result<u64, RepositoryError>;
}
