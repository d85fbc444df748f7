// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::traits::{
    LinkTypeChecker, ERRNO_CONTENT_MISSING, ERRNO_DELETED, ERRNO_INVALID_TARGET,
    ERRNO_NOT_EXISTING,
};
use crate::domain::models::link_target::{LinkContext, LINK_TYPE_PAGE};
use crate::domain::models::link_target_response::LinkTargetResponse;
use crate::domain::repositories::content_repository::ContentRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// 内容元素所在表
const CONTENT_TABLE: &str = "tt_content";

/// 页面链接检查器
///
/// 目标格式为 `<uid>` 或 `<uid>#c<内容元素uid>`
pub struct PageLinkChecker {
    content: Arc<dyn ContentRepository>,
}

impl PageLinkChecker {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    async fn check_page(&self, target: &str) -> LinkTargetResponse {
        let Some((page_uid, content_uid)) = parse_target(target) else {
            return LinkTargetResponse::broken(LINK_TYPE_PAGE, ERRNO_INVALID_TARGET)
                .with_message(format!("Invalid page reference '{}'", target));
        };

        let page = match self.content.find_page(page_uid).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                return LinkTargetResponse::broken(LINK_TYPE_PAGE, ERRNO_NOT_EXISTING)
                    .with_message(format!("Page {} does not exist", page_uid))
            }
            Err(err) => return LinkTargetResponse::unknown(err.to_string()),
        };

        if page.deleted {
            return LinkTargetResponse::broken(LINK_TYPE_PAGE, ERRNO_DELETED)
                .with_message(format!("Page {} was deleted", page_uid))
                .with_custom("title", Value::String(page.title));
        }

        if let Some(content_uid) = content_uid {
            match self.content.find_record(CONTENT_TABLE, content_uid).await {
                Ok(Some(record)) if !record.deleted && record.page_id == page_uid => {}
                Ok(_) => {
                    return LinkTargetResponse::broken(LINK_TYPE_PAGE, ERRNO_CONTENT_MISSING)
                        .with_message(format!(
                            "Content element {} not found on page {}",
                            content_uid, page_uid
                        ))
                        .with_custom("title", Value::String(page.title))
                }
                Err(err) => return LinkTargetResponse::unknown(err.to_string()),
            }
        }

        let mut response = LinkTargetResponse::ok().with_custom("title", Value::String(page.title));
        if page.hidden {
            response = response.with_custom("hidden", Value::Bool(true));
        }
        response
    }
}

#[async_trait]
impl LinkTypeChecker for PageLinkChecker {
    async fn check(&self, target: &str, _context: &LinkContext) -> LinkTargetResponse {
        self.check_page(target).await.with_url_checker(self.name())
    }

    fn name(&self) -> &str {
        LINK_TYPE_PAGE
    }
}

fn parse_target(target: &str) -> Option<(i64, Option<i64>)> {
    match target.split_once('#') {
        Some((page, anchor)) => {
            let page_uid = page.trim().parse().ok()?;
            let content_uid = anchor.strip_prefix('c')?.parse().ok()?;
            Some((page_uid, Some(content_uid)))
        }
        None => Some((target.trim().parse().ok()?, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::link_target_response::CheckStatus;
    use crate::domain::repositories::content_repository::{
        ContentScope, FileInfo, PageInfo, RecordInfo,
    };
    use crate::domain::repositories::RepositoryError;
    use crate::domain::models::link_target::LinkTarget;
    use mockall::mock;
    use mockall::predicate::*;

    mock! {
        pub Content {}
        #[async_trait]
        impl ContentRepository for Content {
            async fn list_link_targets(&self, scope: &ContentScope) -> Result<Vec<LinkTarget>, RepositoryError>;
            async fn find_page(&self, uid: i64) -> Result<Option<PageInfo>, RepositoryError>;
            async fn find_record(&self, table: &str, uid: i64) -> Result<Option<RecordInfo>, RepositoryError>;
            async fn find_file(&self, identifier: &str) -> Result<Option<FileInfo>, RepositoryError>;
        }
    }

    fn page(uid: i64, hidden: bool, deleted: bool) -> PageInfo {
        PageInfo {
            uid,
            title: format!("Page {}", uid),
            hidden,
            deleted,
        }
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("12"), Some((12, None)));
        assert_eq!(parse_target("12#c34"), Some((12, Some(34))));
        assert_eq!(parse_target("12#34"), None);
        assert_eq!(parse_target("abc"), None);
    }

    #[tokio::test]
    async fn test_existing_page_is_ok_with_title() {
        let mut content = MockContent::new();
        content
            .expect_find_page()
            .with(eq(12))
            .returning(|uid| Ok(Some(page(uid, false, false))));
        let checker = PageLinkChecker::new(Arc::new(content));

        let response = checker.check("12", &LinkContext::default()).await;
        assert!(response.is_ok());
        assert_eq!(response.custom().get("title"), Some(&Value::String("Page 12".into())));
        assert_eq!(response.url_checker(), "page");
    }

    #[tokio::test]
    async fn test_hidden_page_is_ok_and_flagged() {
        let mut content = MockContent::new();
        content
            .expect_find_page()
            .returning(|uid| Ok(Some(page(uid, true, false))));
        let checker = PageLinkChecker::new(Arc::new(content));

        let response = checker.check("5", &LinkContext::default()).await;
        assert!(response.is_ok());
        assert_eq!(response.custom().get("hidden"), Some(&Value::Bool(true)));
    }

    #[tokio::test]
    async fn test_missing_and_deleted_pages_are_broken() {
        let mut content = MockContent::new();
        content.expect_find_page().with(eq(1)).returning(|_| Ok(None));
        content
            .expect_find_page()
            .with(eq(2))
            .returning(|uid| Ok(Some(page(uid, false, true))));
        let checker = PageLinkChecker::new(Arc::new(content));

        let missing = checker.check("1", &LinkContext::default()).await;
        assert_eq!(missing.status(), CheckStatus::Broken);
        assert_eq!(missing.errno(), ERRNO_NOT_EXISTING);

        let deleted = checker.check("2", &LinkContext::default()).await;
        assert_eq!(deleted.errno(), ERRNO_DELETED);
    }

    #[tokio::test]
    async fn test_anchor_on_other_page_is_broken() {
        let mut content = MockContent::new();
        content
            .expect_find_page()
            .returning(|uid| Ok(Some(page(uid, false, false))));
        content
            .expect_find_record()
            .with(eq("tt_content"), eq(34))
            .returning(|table, uid| {
                Ok(Some(RecordInfo {
                    table: table.to_string(),
                    uid,
                    page_id: 99,
                    deleted: false,
                }))
            });
        let checker = PageLinkChecker::new(Arc::new(content));

        let response = checker.check("12#c34", &LinkContext::default()).await;
        assert_eq!(response.errno(), ERRNO_CONTENT_MISSING);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_unknown() {
        let mut content = MockContent::new();
        content
            .expect_find_page()
            .returning(|_| Err(RepositoryError::Serialization("bad row".into())));
        let checker = PageLinkChecker::new(Arc::new(content));

        let response = checker.check("1", &LinkContext::default()).await;
        assert_eq!(response.status(), CheckStatus::Unknown);
    }
}
