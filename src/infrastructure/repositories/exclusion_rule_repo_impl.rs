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

use crate::domain::models::exclusion_rule::{ExclusionRule, ExclusionRuleFilter, MatchMode};
use crate::domain::repositories::exclusion_rule_repository::ExclusionRuleRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::exclude_link_target as rule_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 排除规则仓库实现
pub struct ExclusionRuleRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ExclusionRuleRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(m: rule_entity::Model) -> Result<ExclusionRule, RepositoryError> {
        let match_mode = m.match_mode.parse::<MatchMode>().map_err(|_| {
            RepositoryError::Database(DbErr::Custom(format!(
                "Invalid match mode '{}'",
                m.match_mode
            )))
        })?;

        Ok(ExclusionRule {
            id: m.id,
            scope_page_id: m.pid,
            link_type: m.link_type,
            match_mode,
            target: m.linktarget,
            reason: m.reason,
            hidden: m.hidden,
        })
    }
}

#[async_trait]
impl ExclusionRuleRepository for ExclusionRuleRepositoryImpl {
    async fn find_candidates(
        &self,
        link_type: &str,
        scope_page_id: i64,
    ) -> Result<Vec<ExclusionRule>, RepositoryError> {
        let mut query = rule_entity::Entity::find()
            .filter(rule_entity::Column::LinkType.eq(link_type))
            .filter(rule_entity::Column::Hidden.eq(false));
        if scope_page_id != 0 {
            query = query.filter(rule_entity::Column::Pid.eq(scope_page_id));
        }

        query
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Self::to_domain)
            .collect()
    }

    async fn list(&self, filter: &ExclusionRuleFilter) -> Result<Vec<ExclusionRule>, RepositoryError> {
        let mut query = rule_entity::Entity::find();

        if let Some(link_type) = &filter.link_type {
            query = query.filter(rule_entity::Column::LinkType.eq(link_type.as_str()));
        }
        if let Some(match_mode) = filter.match_mode {
            query = query.filter(rule_entity::Column::MatchMode.eq(match_mode.to_string()));
        }
        if let Some(pid) = filter.scope_page_id {
            query = query.filter(rule_entity::Column::Pid.eq(pid));
        }
        if let Some(needle) = &filter.target_contains {
            query = query.filter(rule_entity::Column::Linktarget.contains(needle.as_str()));
        }
        if !filter.include_hidden {
            query = query.filter(rule_entity::Column::Hidden.eq(false));
        }

        query = query.order_by_asc(rule_entity::Column::Id);
        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        query
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Self::to_domain)
            .collect()
    }

    async fn create(&self, rule: &ExclusionRule) -> Result<ExclusionRule, RepositoryError> {
        let model = rule_entity::ActiveModel {
            pid: Set(rule.scope_page_id),
            link_type: Set(rule.link_type.clone()),
            match_mode: Set(rule.match_mode.to_string()),
            linktarget: Set(rule.target.clone()),
            reason: Set(rule.reason.clone()),
            hidden: Set(rule.hidden),
            ..Default::default()
        };

        let saved = model.insert(self.db.as_ref()).await?;
        Self::to_domain(saved)
    }
}
