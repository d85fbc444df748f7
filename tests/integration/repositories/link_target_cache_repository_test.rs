// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::setup_db;
use chrono::Utc;
use linkwatch::config::checker::CacheConfig;
use linkwatch::domain::models::link_target_response::{
    CheckStatus, LinkTargetResponse, ReasonCannotCheck,
};
use linkwatch::domain::repositories::link_target_cache_repository::LinkTargetCacheRepository;
use linkwatch::domain::services::link_target_cache::LinkTargetCache;
use linkwatch::infrastructure::repositories::link_target_cache_repo_impl::LinkTargetCacheRepositoryImpl;
use std::sync::Arc;

async fn setup_cache() -> (LinkTargetCache, Arc<LinkTargetCacheRepositoryImpl>) {
    let db = setup_db().await;
    let repo = Arc::new(LinkTargetCacheRepositoryImpl::new(db));
    (LinkTargetCache::new(repo.clone(), CacheConfig::default()), repo)
}

/// 测试写入后在过期窗口内可以原样读回
#[tokio::test]
async fn test_set_result_then_get_response() {
    let (cache, _) = setup_cache().await;
    let response = LinkTargetResponse::broken("http", 404).with_message("Not Found");

    cache
        .set_result("https://example.org/missing", "external", &response)
        .await
        .unwrap();

    assert!(cache
        .has_entry("https://example.org/missing", "external", true, 0)
        .await
        .unwrap());
    let cached = cache
        .get_response("https://example.org/missing", "external", 0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached, response);

    // same target under another link type is a different key
    assert!(!cache
        .has_entry("https://example.org/missing", "page", false, 0)
        .await
        .unwrap());
}

/// 测试同一键的重复写入只保留一行并以最后一次为准
#[tokio::test]
async fn test_upsert_is_last_write_wins() {
    let (cache, repo) = setup_cache().await;

    cache
        .set_result("https://example.org", "external", &LinkTargetResponse::broken("http", 500))
        .await
        .unwrap();
    cache
        .set_result(
            "https://example.org",
            "external",
            &LinkTargetResponse::cannot_check(ReasonCannotCheck::TooManyRequests),
        )
        .await
        .unwrap();

    let record = repo.find("https://example.org", "external").await.unwrap().unwrap();
    assert_eq!(record.check_status, CheckStatus::CannotCheck.code());

    let response = cache
        .get_response("https://example.org", "external", 0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        response.reason_cannot_check(),
        Some(ReasonCannotCheck::TooManyRequests)
    );

    assert_eq!(cache.remove("https://example.org", "external").await.unwrap(), 1);
    assert_eq!(cache.remove("https://example.org", "external").await.unwrap(), 0);
}

/// 测试过期判断和清理
#[tokio::test]
async fn test_expiry_and_purge() {
    let (cache, _) = setup_cache().await;
    let now = Utc::now().timestamp();

    let old = LinkTargetResponse::ok().with_last_checked(now - 2 * 604_800);
    let recent = LinkTargetResponse::ok().with_last_checked(now - 3600);
    cache.set_result("https://old.test", "external", &old).await.unwrap();
    cache.set_result("https://recent.test", "external", &recent).await.unwrap();

    assert!(!cache.has_entry("https://old.test", "external", true, 0).await.unwrap());
    assert!(cache.has_entry("https://old.test", "external", false, 0).await.unwrap());
    assert!(cache.get_response("https://old.test", "external", 0).await.unwrap().is_none());

    // explicit window shorter than the entry age
    assert!(!cache
        .has_entry("https://recent.test", "external", true, 1800)
        .await
        .unwrap());

    assert_eq!(cache.purge_expired().await.unwrap(), 1);
    assert!(!cache.has_entry("https://old.test", "external", false, 0).await.unwrap());
    assert!(cache.has_entry("https://recent.test", "external", true, 0).await.unwrap());
}
