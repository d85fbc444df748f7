// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::setup_db;
use linkwatch::domain::models::exclusion_rule::{ExclusionRule, ExclusionRuleFilter, MatchMode};
use linkwatch::domain::repositories::exclusion_rule_repository::ExclusionRuleRepository;
use linkwatch::domain::services::exclusion_matcher::ExclusionMatcher;
use linkwatch::infrastructure::repositories::exclusion_rule_repo_impl::ExclusionRuleRepositoryImpl;
use std::sync::Arc;

async fn seed(repo: &ExclusionRuleRepositoryImpl) {
    let rules = [
        ExclusionRule::new("external", MatchMode::Exact, "https://example.org/legacy")
            .with_reason("Known redirect loop"),
        ExclusionRule::new("external", MatchMode::Domain, "intranet.local"),
        ExclusionRule::new("external", MatchMode::Domain, "staging.test").with_scope_page(42),
        ExclusionRule::new("external", MatchMode::Exact, "https://hidden.test").hidden(true),
        ExclusionRule::new("page", MatchMode::Exact, "17"),
    ];
    for rule in rules {
        repo.create(&rule).await.unwrap();
    }
}

/// 测试候选规则查询排除隐藏规则并支持页面作用域
#[tokio::test]
async fn test_find_candidates() {
    let repo = ExclusionRuleRepositoryImpl::new(setup_db().await);
    seed(&repo).await;

    let global = repo.find_candidates("external", 0).await.unwrap();
    assert_eq!(global.len(), 3);
    assert!(global.iter().all(|rule| !rule.hidden));

    let scoped = repo.find_candidates("external", 42).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].target, "staging.test");

    let pages = repo.find_candidates("page", 0).await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].match_mode, MatchMode::Exact);
}

/// 测试按过滤条件分页列出规则
#[tokio::test]
async fn test_list_with_filter() {
    let repo = ExclusionRuleRepositoryImpl::new(setup_db().await);
    seed(&repo).await;

    let all = repo
        .list(&ExclusionRuleFilter {
            include_hidden: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 5);

    let domains = repo
        .list(&ExclusionRuleFilter {
            link_type: Some("external".to_string()),
            match_mode: Some(MatchMode::Domain),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(domains.len(), 2);

    let page = repo
        .list(&ExclusionRuleFilter {
            target_contains: Some("example".to_string()),
            limit: Some(1),
            offset: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].reason, "Known redirect loop");
}

/// 测试匹配器对数据库中的规则进行精确和域名匹配
#[tokio::test]
async fn test_matcher_against_stored_rules() {
    let repo = Arc::new(ExclusionRuleRepositoryImpl::new(setup_db().await));
    seed(&repo).await;
    let matcher = ExclusionMatcher::new(repo);

    assert!(matcher
        .is_excluded("https://example.org/legacy", "external", 0)
        .await
        .unwrap());
    assert!(!matcher
        .is_excluded("https://example.org/legacy/other", "external", 0)
        .await
        .unwrap());
    assert!(matcher
        .is_excluded("http://wiki.intranet.local/start", "external", 0)
        .await
        .unwrap());
    assert!(!matcher
        .is_excluded("https://hidden.test", "external", 0)
        .await
        .unwrap());
    // rule stored under page 42 does not apply to another storage page
    assert!(!matcher
        .is_excluded("https://staging.test/", "external", 7)
        .await
        .unwrap());
}
