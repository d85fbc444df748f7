// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::setup_db;
use chrono::Utc;
use linkwatch::config::checker::CheckerConfig;
use linkwatch::domain::models::exclusion_rule::{ExclusionRule, MatchMode};
use linkwatch::domain::models::link_target_response::{CheckStatus, LinkTargetResponse};
use linkwatch::domain::repositories::broken_link_repository::BrokenLinkRepository;
use linkwatch::domain::repositories::content_repository::{ContentRepository, ContentScope};
use linkwatch::domain::repositories::exclusion_rule_repository::ExclusionRuleRepository;
use linkwatch::domain::services::exclusion_matcher::ExclusionMatcher;
use linkwatch::domain::services::link_checker::LinkChecker;
use linkwatch::domain::services::link_target_cache::{ExpiryWindow, LinkTargetCache};
use linkwatch::infrastructure::content::manifest::ManifestContentRepository;
use linkwatch::infrastructure::repositories::broken_link_repo_impl::BrokenLinkRepositoryImpl;
use linkwatch::infrastructure::repositories::exclusion_rule_repo_impl::ExclusionRuleRepositoryImpl;
use linkwatch::infrastructure::repositories::link_target_cache_repo_impl::LinkTargetCacheRepositoryImpl;
use linkwatch::linktypes::db::DbLinkChecker;
use linkwatch::linktypes::file::FileLinkChecker;
use linkwatch::linktypes::page::PageLinkChecker;
use linkwatch::linktypes::registry::LinkTypeRegistry;
use linkwatch::utils::robots::RobotsChecker;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const MANIFEST: &str = r#"{
    "pages": [
        {"uid": 1, "title": "Home"},
        {"uid": 2, "title": "Archive", "deleted": true},
        {"uid": 17, "title": "Landing"}
    ],
    "records": [{"table": "tt_content", "uid": 10, "page_id": 1}],
    "files": [{"identifier": "fileadmin/report.pdf"}],
    "links": [
        {"target": "tt_content:10", "link_type": "db",
         "context": {"record_table": "tt_content", "record_uid": 1, "field": "bodytext", "page_id": 1}},
        {"target": "tt_content:99", "link_type": "db",
         "context": {"record_table": "tt_content", "record_uid": 2, "field": "bodytext", "page_id": 1}},
        {"target": "2", "link_type": "page",
         "context": {"record_table": "tt_content", "record_uid": 3, "field": "header_link", "page_id": 3}},
        {"target": "17", "link_type": "page",
         "context": {"record_table": "tt_content", "record_uid": 4, "field": "header_link", "page_id": 3}},
        {"target": "fileadmin/report.pdf", "link_type": "file",
         "context": {"record_table": "tt_content", "record_uid": 5, "field": "media", "page_id": 4}},
        {"target": "https://example.org", "link_type": "external",
         "context": {"record_table": "tt_content", "record_uid": 6, "field": "bodytext", "page_id": 4}}
    ]
}"#;

struct Workflow {
    checker: Arc<LinkChecker>,
    content: Arc<dyn ContentRepository>,
    cache: LinkTargetCache,
    broken_links: Arc<BrokenLinkRepositoryImpl>,
}

async fn setup_workflow() -> Workflow {
    let db = setup_db().await;
    let content: Arc<dyn ContentRepository> =
        Arc::new(ManifestContentRepository::from_json(MANIFEST).unwrap());

    // external links are disabled so nothing leaves the process
    let config = Arc::new(CheckerConfig {
        enabled_link_types: vec!["page".to_string(), "db".to_string(), "file".to_string()],
        ..CheckerConfig::default()
    });

    let cache_repo = Arc::new(LinkTargetCacheRepositoryImpl::new(db.clone()));
    let rules = Arc::new(ExclusionRuleRepositoryImpl::new(db.clone()));
    rules
        .create(&ExclusionRule::new("page", MatchMode::Exact, "17").with_reason("Campaign page"))
        .await
        .unwrap();
    let broken_links = Arc::new(BrokenLinkRepositoryImpl::new(db.clone()));

    let mut registry = LinkTypeRegistry::new();
    registry.register("page", Arc::new(PageLinkChecker::new(content.clone())));
    registry.register("db", Arc::new(DbLinkChecker::new(content.clone())));
    registry.register("file", Arc::new(FileLinkChecker::new(content.clone())));

    let checker = LinkChecker::new(
        config.clone(),
        LinkTargetCache::new(cache_repo.clone(), config.cache.clone()),
        ExclusionMatcher::new(rules),
        Arc::new(RobotsChecker::new(&config.robots)),
        registry,
        broken_links.clone(),
    )
    .unwrap();

    Workflow {
        checker: Arc::new(checker),
        content,
        cache: LinkTargetCache::new(cache_repo, config.cache.clone()),
        broken_links,
    }
}

/// 测试完整运行：缓存命中、排除、内部链接检查和失效链接记录
#[tokio::test]
async fn test_full_run_against_manifest() {
    let workflow = setup_workflow().await;

    // the file was reported broken an hour ago; within the window that answer is reused
    let cached = LinkTargetResponse::broken("file", 1).with_last_checked(Utc::now().timestamp() - 3600);
    workflow
        .cache
        .set_result("fileadmin/report.pdf", "file", &cached)
        .await
        .unwrap();

    let report = workflow
        .checker
        .run(
            workflow.content.as_ref(),
            &ContentScope::default(),
            ExpiryWindow::Low,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let stats = &report.statistics;
    assert!(!report.cancelled);
    assert_eq!(stats.count_pages, 3);
    assert_eq!(stats.count_links_total, 5);
    assert_eq!(stats.count_links_by_status["ok"], 1);
    assert_eq!(stats.count_links_by_status["broken"], 3);
    assert_eq!(stats.count_links_by_status["excluded"], 1);
    assert_eq!(stats.count_new_broken_links, 2);

    let grouped = report.grouped_by_target();
    let file = grouped["fileadmin/report.pdf"][0];
    assert!(file.from_cache);
    assert_eq!(file.response, cached);
    assert_eq!(grouped["17"][0].response.status(), CheckStatus::Excluded);
    assert_eq!(grouped["tt_content:10"][0].response.status(), CheckStatus::Ok);
    assert!(!grouped.contains_key("https://example.org"));

    assert_eq!(report.broken_links.len(), 3);
    let stored = workflow
        .broken_links
        .list_by_run(report.run_id, CheckStatus::Broken)
        .await
        .unwrap();
    assert_eq!(stored.len(), 3);
}

/// 测试第二次运行完全由缓存应答且不再产生新的失效链接
#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let workflow = setup_workflow().await;
    let scope = ContentScope::default();

    let first = workflow
        .checker
        .run(workflow.content.as_ref(), &scope, ExpiryWindow::Low, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(first.statistics.count_new_broken_links, 2);

    let second = workflow
        .checker
        .run(workflow.content.as_ref(), &scope, ExpiryWindow::High, CancellationToken::new())
        .await
        .unwrap();

    assert_ne!(first.run_id, second.run_id);
    assert!(second.results.iter().all(|result| result.from_cache));
    assert_eq!(second.statistics.count_new_broken_links, 0);
    assert_eq!(second.statistics.count_links_by_status["broken"], 2);
    assert_eq!(second.statistics.count_links_by_status["excluded"], 1);
}

/// 测试按页面限定范围
#[tokio::test]
async fn test_scoped_run_only_checks_selected_pages() {
    let workflow = setup_workflow().await;

    let report = workflow
        .checker
        .run(
            workflow.content.as_ref(),
            &ContentScope { page_ids: vec![1] },
            ExpiryWindow::Low,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.statistics.count_pages, 1);
    assert_eq!(report.results.len(), 2);
    assert!(report.results.iter().all(|result| result.link.link_type == "db"));
}
