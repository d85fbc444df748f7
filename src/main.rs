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

use anyhow::Context;
use linkwatch::config::settings::Settings;
use linkwatch::domain::repositories::content_repository::ContentRepository;
use linkwatch::domain::services::exclusion_matcher::ExclusionMatcher;
use linkwatch::domain::services::link_checker::LinkChecker;
use linkwatch::domain::services::link_target_cache::{ExpiryWindow, LinkTargetCache};
use linkwatch::infrastructure::content::manifest::ManifestContentRepository;
use linkwatch::infrastructure::database::connection;
use linkwatch::infrastructure::repositories::broken_link_repo_impl::BrokenLinkRepositoryImpl;
use linkwatch::infrastructure::repositories::exclusion_rule_repo_impl::ExclusionRuleRepositoryImpl;
use linkwatch::infrastructure::repositories::link_target_cache_repo_impl::LinkTargetCacheRepositoryImpl;
use linkwatch::linktypes::registry::LinkTypeRegistry;
use linkwatch::utils::robots::RobotsChecker;
use linkwatch::utils::telemetry;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 主函数
///
/// 加载配置、连接数据库，对清单中的链接执行一次检查并输出JSON报告
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting linkwatch...");

    // 2. Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    let checker_config = Arc::new(
        settings
            .checker_config()
            .context("invalid link check configuration")?,
    );
    info!("Configuration loaded");

    // 3. Connect to database and apply migrations
    let db = connection::connect_and_migrate(&settings.database)
        .await
        .context("failed to prepare database")?;
    let db = Arc::new(db);
    info!("Database connection established");

    // 4. Load content manifest
    let manifest = tokio::fs::read_to_string(&settings.content.manifest_path)
        .await
        .with_context(|| {
            format!(
                "failed to read content manifest {}",
                settings.content.manifest_path
            )
        })?;
    let content: Arc<dyn ContentRepository> = Arc::new(
        ManifestContentRepository::from_json(&manifest)
            .context("failed to parse content manifest")?,
    );

    // 5. Initialize components
    let cache = LinkTargetCache::new(
        Arc::new(LinkTargetCacheRepositoryImpl::new(db.clone())),
        checker_config.cache.clone(),
    );
    let exclusion = ExclusionMatcher::new(Arc::new(ExclusionRuleRepositoryImpl::new(db.clone())));
    let robots = Arc::new(RobotsChecker::new(&checker_config.robots));
    let registry = LinkTypeRegistry::with_defaults(&checker_config, content.clone())
        .context("failed to build HTTP client")?;
    let broken_links = Arc::new(BrokenLinkRepositoryImpl::new(db.clone()));

    let checker = Arc::new(
        LinkChecker::new(
            checker_config.clone(),
            cache,
            exclusion,
            robots,
            registry,
            broken_links,
        )
        .context("failed to initialize link checker")?,
    );

    // 6. Cancel the run on Ctrl-C
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C, cancelling link check run");
            signal_token.cancel();
        }
    });

    // 7. Run
    let report = checker
        .run(
            content.as_ref(),
            &settings.content.scope,
            ExpiryWindow::Low,
            cancel,
        )
        .await
        .context("link check run failed")?;

    info!(
        run_id = %report.run_id,
        broken = report.broken_links.len(),
        cancelled = report.cancelled,
        "Link check run finished"
    );

    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{}", json);

    Ok(())
}
