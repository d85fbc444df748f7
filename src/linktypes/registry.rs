// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::db::DbLinkChecker;
use super::external::ExternalLinkChecker;
use super::file::FileLinkChecker;
use super::page::PageLinkChecker;
use super::traits::LinkTypeChecker;
use crate::config::checker::CheckerConfig;
use crate::domain::models::link_target::{LINK_TYPE_DB, LINK_TYPE_EXTERNAL, LINK_TYPE_FILE, LINK_TYPE_PAGE};
use crate::domain::repositories::content_repository::ContentRepository;
use std::collections::HashMap;
use std::sync::Arc;

/// 链接类型注册表
///
/// 负责将链接类型名称映射到对应的检查器
#[derive(Clone, Default)]
pub struct LinkTypeRegistry {
    checkers: HashMap<String, Arc<dyn LinkTypeChecker>>,
}

impl LinkTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册内置的四种检查器
    pub fn with_defaults(
        config: &CheckerConfig,
        content: Arc<dyn ContentRepository>,
    ) -> Result<Self, reqwest::Error> {
        let mut registry = Self::new();
        registry.register(LINK_TYPE_EXTERNAL, Arc::new(ExternalLinkChecker::new(config)?));
        registry.register(LINK_TYPE_PAGE, Arc::new(PageLinkChecker::new(content.clone())));
        registry.register(LINK_TYPE_DB, Arc::new(DbLinkChecker::new(content.clone())));
        registry.register(LINK_TYPE_FILE, Arc::new(FileLinkChecker::new(content)));
        Ok(registry)
    }

    /// 注册检查器，同名检查器会被替换
    pub fn register(&mut self, link_type: impl Into<String>, checker: Arc<dyn LinkTypeChecker>) {
        self.checkers.insert(link_type.into(), checker);
    }

    pub fn get(&self, link_type: &str) -> Option<Arc<dyn LinkTypeChecker>> {
        self.checkers.get(link_type).cloned()
    }

    pub fn contains(&self, link_type: &str) -> bool {
        self.checkers.contains_key(link_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::link_target::LinkContext;
    use crate::domain::models::link_target_response::LinkTargetResponse;
    use async_trait::async_trait;

    struct AlwaysOk;

    #[async_trait]
    impl LinkTypeChecker for AlwaysOk {
        async fn check(&self, _target: &str, _context: &LinkContext) -> LinkTargetResponse {
            LinkTargetResponse::ok()
        }

        fn name(&self) -> &str {
            "always_ok"
        }
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        let mut registry = LinkTypeRegistry::new();
        registry.register("custom", Arc::new(AlwaysOk));

        assert!(registry.contains("custom"));
        assert!(registry.get("external").is_none());
        let checker = registry.get("custom").unwrap();
        assert_eq!(checker.name(), "always_ok");
        assert!(checker.check("x", &LinkContext::default()).await.is_ok());
    }
}
