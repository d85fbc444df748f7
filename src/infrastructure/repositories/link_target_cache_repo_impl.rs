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

use crate::domain::models::cache_entry::CacheRecord;
use crate::domain::repositories::link_target_cache_repository::LinkTargetCacheRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::link_target_cache as cache_entity;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;

/// 链接目标缓存仓库实现
pub struct LinkTargetCacheRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl LinkTargetCacheRepositoryImpl {
    /// 创建新的缓存仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<cache_entity::Model> for CacheRecord {
    fn from(m: cache_entity::Model) -> Self {
        CacheRecord {
            target: m.url,
            link_type: m.link_type,
            url_response: m.url_response,
            check_status: m.check_status,
            last_check: m.last_check,
        }
    }
}

#[async_trait]
impl LinkTargetCacheRepository for LinkTargetCacheRepositoryImpl {
    async fn find(&self, url: &str, link_type: &str) -> Result<Option<CacheRecord>, RepositoryError> {
        let model = cache_entity::Entity::find()
            .filter(cache_entity::Column::Url.eq(url))
            .filter(cache_entity::Column::LinkType.eq(link_type))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn upsert(&self, record: &CacheRecord) -> Result<(), RepositoryError> {
        let model = cache_entity::ActiveModel {
            url: Set(record.target.clone()),
            link_type: Set(record.link_type.clone()),
            url_response: Set(record.url_response.clone()),
            check_status: Set(record.check_status),
            last_check: Set(record.last_check),
            ..Default::default()
        };

        cache_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([cache_entity::Column::Url, cache_entity::Column::LinkType])
                    .update_columns([
                        cache_entity::Column::UrlResponse,
                        cache_entity::Column::CheckStatus,
                        cache_entity::Column::LastCheck,
                    ])
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn remove(&self, url: &str, link_type: &str) -> Result<u64, RepositoryError> {
        let result = cache_entity::Entity::delete_many()
            .filter(cache_entity::Column::Url.eq(url))
            .filter(cache_entity::Column::LinkType.eq(link_type))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn remove_older_than(&self, last_check: i64) -> Result<u64, RepositoryError> {
        let result = cache_entity::Entity::delete_many()
            .filter(cache_entity::Column::LastCheck.lt(last_check))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}
