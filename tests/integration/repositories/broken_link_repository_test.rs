// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{link, setup_db};
use linkwatch::domain::models::broken_link::BrokenLinkRecord;
use linkwatch::domain::models::link_target_response::{
    CheckStatus, LinkTargetResponse, ReasonCannotCheck,
};
use linkwatch::domain::repositories::broken_link_repository::BrokenLinkRepository;
use linkwatch::infrastructure::repositories::broken_link_repo_impl::BrokenLinkRepositoryImpl;
use uuid::Uuid;

/// 测试按运行和状态列出失效链接
#[tokio::test]
async fn test_list_by_run_with_status_filter() {
    let repo = BrokenLinkRepositoryImpl::new(setup_db().await);
    let run_id = Uuid::new_v4();
    let other_run = Uuid::new_v4();

    let broken = LinkTargetResponse::broken("http", 404).with_message("Not Found");
    let blocked = LinkTargetResponse::cannot_check(ReasonCannotCheck::RobotsTxt);

    repo.create(&BrokenLinkRecord::new(run_id, &link("https://a.test", "external", 1, 3), &broken))
        .await
        .unwrap();
    repo.create(&BrokenLinkRecord::new(run_id, &link("https://b.test", "external", 2, 1), &blocked))
        .await
        .unwrap();
    repo.create(&BrokenLinkRecord::new(other_run, &link("https://c.test", "external", 3, 1), &broken))
        .await
        .unwrap();

    let all = repo.list_by_run(run_id, CheckStatus::All).await.unwrap();
    assert_eq!(all.len(), 2);
    // ordered by page
    assert_eq!(all[0].url, "https://b.test");
    assert_eq!(all[1].errno, 404);
    assert_eq!(all[1].response, broken);

    let only_broken = repo.list_by_run(run_id, CheckStatus::Broken).await.unwrap();
    assert_eq!(only_broken.len(), 1);
    assert_eq!(only_broken[0].error_type, "http");
    assert_eq!(only_broken[0].record_uid, 1);

    assert_eq!(repo.delete_except_run(run_id).await.unwrap(), 1);
    assert!(repo.list_by_run(other_run, CheckStatus::All).await.unwrap().is_empty());
}
