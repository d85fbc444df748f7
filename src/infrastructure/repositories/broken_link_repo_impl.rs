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

use crate::domain::models::broken_link::BrokenLinkRecord;
use crate::domain::models::link_target_response::CheckStatus;
use crate::domain::models::response_codec;
use crate::domain::repositories::broken_link_repository::BrokenLinkRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::broken_link as broken_link_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 失效链接仓库实现
pub struct BrokenLinkRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl BrokenLinkRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(m: broken_link_entity::Model) -> Result<BrokenLinkRecord, RepositoryError> {
        let check_status = CheckStatus::from_code(m.check_status).ok_or_else(|| {
            RepositoryError::Database(DbErr::Custom(format!(
                "Invalid check status {}",
                m.check_status
            )))
        })?;
        let response = response_codec::decode(&m.url_response)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        Ok(BrokenLinkRecord {
            id: m.id,
            run_id: m.run_id,
            url: m.url,
            link_type: m.link_type,
            record_table: m.record_table,
            record_uid: m.record_uid,
            field: m.field,
            page_id: m.page_id,
            check_status,
            error_type: m.error_type,
            errno: m.errno,
            message: m.message,
            response,
            last_check: m.last_check,
            created_at: m.created_at.into(),
        })
    }
}

#[async_trait]
impl BrokenLinkRepository for BrokenLinkRepositoryImpl {
    async fn create(&self, record: &BrokenLinkRecord) -> Result<BrokenLinkRecord, RepositoryError> {
        let model = broken_link_entity::ActiveModel {
            id: Set(record.id),
            run_id: Set(record.run_id),
            url: Set(record.url.clone()),
            link_type: Set(record.link_type.clone()),
            record_table: Set(record.record_table.clone()),
            record_uid: Set(record.record_uid),
            field: Set(record.field.clone()),
            page_id: Set(record.page_id),
            check_status: Set(record.check_status.code()),
            error_type: Set(record.error_type.clone()),
            errno: Set(record.errno),
            message: Set(record.message.clone()),
            url_response: Set(response_codec::encode(&record.response)?),
            last_check: Set(record.last_check),
            created_at: Set(record.created_at.into()),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(record.clone())
    }

    async fn list_by_run(
        &self,
        run_id: Uuid,
        status: CheckStatus,
    ) -> Result<Vec<BrokenLinkRecord>, RepositoryError> {
        let mut query = broken_link_entity::Entity::find()
            .filter(broken_link_entity::Column::RunId.eq(run_id));
        if status != CheckStatus::All {
            query = query.filter(broken_link_entity::Column::CheckStatus.eq(status.code()));
        }

        query
            .order_by_asc(broken_link_entity::Column::PageId)
            .order_by_asc(broken_link_entity::Column::Url)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Self::to_domain)
            .collect()
    }

    async fn delete_except_run(&self, run_id: Uuid) -> Result<u64, RepositoryError> {
        let result = broken_link_entity::Entity::delete_many()
            .filter(broken_link_entity::Column::RunId.ne(run_id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}
