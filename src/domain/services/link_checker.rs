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

use crate::config::checker::CheckerConfig;
use crate::domain::models::broken_link::BrokenLinkRecord;
use crate::domain::models::check_statistics::CheckStatistics;
use crate::domain::models::link_target::LinkTarget;
use crate::domain::models::link_target_response::{CheckStatus, LinkTargetResponse, ReasonCannotCheck};
use crate::domain::models::report::{CheckReport, LinkCheckResult};
use crate::domain::repositories::broken_link_repository::BrokenLinkRepository;
use crate::domain::repositories::content_repository::{ContentRepository, ContentScope};
use crate::domain::services::crawl_delay::CrawlDelayGovernor;
use crate::domain::services::exclusion_matcher::ExclusionMatcher;
use crate::domain::services::link_target_cache::{ExpiryWindow, LinkTargetCache};
use crate::linktypes::registry::LinkTypeRegistry;
use crate::utils::errors::LinkCheckError;
use crate::utils::robots::RobotsCheckerTrait;
use crate::utils::url_utils::{extract_domain, preprocess_url};
use crate::workers::scheduler::CheckScheduler;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 一次检查运行的共享状态
pub struct CheckRun {
    pub run_id: Uuid,
    pub statistics: Arc<CheckStatistics>,
    pub cancel: CancellationToken,
    pub expiry: ExpiryWindow,
    results: Mutex<Vec<LinkCheckResult>>,
    broken_links: Mutex<Vec<BrokenLinkRecord>>,
}

impl CheckRun {
    pub fn new(expiry: ExpiryWindow, cancel: CancellationToken) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            statistics: Arc::new(CheckStatistics::new()),
            cancel,
            expiry,
            results: Mutex::new(Vec::new()),
            broken_links: Mutex::new(Vec::new()),
        }
    }

    fn push_result(&self, result: LinkCheckResult) {
        self.results.lock().push(result);
    }

    fn push_broken_link(&self, record: BrokenLinkRecord) {
        self.broken_links.lock().push(record);
    }

    /// 生成运行报告
    pub fn report(&self) -> CheckReport {
        CheckReport {
            run_id: self.run_id,
            statistics: self.statistics.snapshot(),
            results: self.results.lock().clone(),
            broken_links: self.broken_links.lock().clone(),
            cancelled: self.cancel.is_cancelled(),
        }
    }
}

/// 链接检查引擎
///
/// 对每个目标依次执行：缓存 → 排除规则 → 抓取间隔 → robots.txt → 类型检查 → 写缓存 → 统计
pub struct LinkChecker {
    config: Arc<CheckerConfig>,
    cache: LinkTargetCache,
    exclusion: ExclusionMatcher,
    crawl_delay: CrawlDelayGovernor,
    robots: Arc<dyn RobotsCheckerTrait>,
    registry: LinkTypeRegistry,
    broken_links: Arc<dyn BrokenLinkRepository>,
}

impl LinkChecker {
    /// 创建链接检查引擎
    ///
    /// 每个启用的链接类型都必须有注册的检查器，否则返回配置错误
    pub fn new(
        config: Arc<CheckerConfig>,
        cache: LinkTargetCache,
        exclusion: ExclusionMatcher,
        robots: Arc<dyn RobotsCheckerTrait>,
        registry: LinkTypeRegistry,
        broken_links: Arc<dyn BrokenLinkRepository>,
    ) -> Result<Self, LinkCheckError> {
        if let Some(missing) = config
            .enabled_link_types
            .iter()
            .find(|link_type| !registry.contains(link_type))
        {
            return Err(LinkCheckError::Configuration(format!(
                "No checker registered for enabled link type '{}'",
                missing
            )));
        }

        Ok(Self {
            crawl_delay: CrawlDelayGovernor::new(&config.crawl_delay),
            config,
            cache,
            exclusion,
            robots,
            registry,
            broken_links,
        })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// 过滤未启用的链接类型和被排除的内容类型
    pub fn filter_candidates(&self, links: Vec<LinkTarget>) -> Vec<LinkTarget> {
        links
            .into_iter()
            .filter(|link| self.config.is_link_type_enabled(&link.link_type))
            .filter(|link| {
                !self
                    .config
                    .is_content_type_excluded(link.context.content_type.as_deref())
            })
            .collect()
    }

    /// 检查内容范围内的所有链接
    ///
    /// 单个目标的失败不会中断运行；排除规则查询失败会终止运行
    pub async fn run(
        self: &Arc<Self>,
        content: &dyn ContentRepository,
        scope: &ContentScope,
        expiry: ExpiryWindow,
        cancel: CancellationToken,
    ) -> Result<CheckReport, LinkCheckError> {
        let links = content
            .list_link_targets(scope)
            .await
            .map_err(LinkCheckError::Content)?;
        self.check_links(links, expiry, cancel).await
    }

    /// 检查给定的链接列表
    pub async fn check_links(
        self: &Arc<Self>,
        links: Vec<LinkTarget>,
        expiry: ExpiryWindow,
        cancel: CancellationToken,
    ) -> Result<CheckReport, LinkCheckError> {
        let links = self.filter_candidates(links);
        let run = Arc::new(CheckRun::new(expiry, cancel));

        let pages: HashSet<i64> = links.iter().map(|link| link.context.page_id).collect();
        run.statistics.set_count_pages(pages.len() as u64);
        run.statistics.start(Utc::now().timestamp());
        info!(
            "Starting link check run {} with {} targets on {} pages",
            run.run_id,
            links.len(),
            pages.len()
        );

        let scheduler = CheckScheduler::new(self.clone(), self.config.worker_pool_size);
        let outcome = scheduler.schedule(links, run.clone()).await;

        run.statistics.finish(Utc::now().timestamp());
        outcome?;

        let report = run.report();
        info!(
            "Finished link check run {}: {} links, {} broken, {} new broken{}",
            report.run_id,
            report.statistics.count_links_total,
            run.statistics.count_links_by_status(CheckStatus::Broken),
            report.statistics.count_new_broken_links,
            if report.cancelled { " (cancelled)" } else { "" }
        );
        Ok(report)
    }

    /// 检查单个目标
    ///
    /// # 返回值
    ///
    /// * `Ok(LinkCheckResult)` - 检查结果
    /// * `Err(LinkCheckError::Cancelled)` - 运行在抓取间隔等待期间被取消
    /// * `Err(LinkCheckError::ExclusionLookup)` - 排除规则存储不可用
    pub async fn check_target(
        &self,
        link: &LinkTarget,
        run: &CheckRun,
    ) -> Result<LinkCheckResult, LinkCheckError> {
        let target = link.target.as_str();
        let link_type = link.link_type.as_str();

        let previous = match self.cache.find_entry(target, link_type).await {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Cache lookup for {} failed, checking anyway: {}", target, err);
                None
            }
        };

        // 1. Fresh cache entry
        let expire = self.cache.expire_secs(run.expiry);
        if let Some(entry) = previous
            .as_ref()
            .filter(|entry| entry.is_fresh(Utc::now().timestamp(), expire))
        {
            debug!("Cache hit for {} ({})", target, link_type);
            metrics::counter!("linkwatch_cache_hits_total").increment(1);
            return Ok(self.finish(link, entry.response.clone(), true, false, run).await);
        }

        // 2. Exclusion rules
        if self
            .exclusion
            .is_excluded(target, link_type, self.config.exclusion_storage_page)
            .await?
        {
            debug!("Target {} is excluded", target);
            let response = LinkTargetResponse::excluded().with_url_checker(link_type);
            self.store(link, &response).await;
            return Ok(self.finish(link, response, false, false, run).await);
        }

        if link.is_external() {
            let url = preprocess_url(target);
            let domain = extract_domain(&url).unwrap_or_default();

            // 3. Crawl delay
            let waited = self.crawl_delay.delay_or_cancel(&domain, &run.cancel).await;
            if run.cancel.is_cancelled() {
                return Err(LinkCheckError::Cancelled);
            }
            if waited > 0 {
                debug!("Waited {}s before requesting {}", waited, domain);
            }

            // 4. Robots policy
            if !self.robots.is_allowed(&url, &self.config.user_agent).await {
                debug!("robots.txt disallows {}", target);
                let response = LinkTargetResponse::cannot_check(ReasonCannotCheck::RobotsTxt)
                    .with_url_checker(link_type);
                self.store(link, &response).await;
                return Ok(self.finish(link, response, false, false, run).await);
            }
        }

        // 5. Type specific check
        let response = self.dispatch(link).await;
        debug!("Checked {} ({}): {}", target, link_type, response.status());

        // 6. Persist
        let was_broken = previous.is_some_and(|entry| entry.response.is_broken());
        if response.status() != CheckStatus::Unknown {
            self.store(link, &response).await;
        }

        Ok(self.finish(link, response, false, was_broken, run).await)
    }

    async fn dispatch(&self, link: &LinkTarget) -> LinkTargetResponse {
        let Some(checker) = self.registry.get(&link.link_type) else {
            return LinkTargetResponse::unknown(format!(
                "No checker registered for link type '{}'",
                link.link_type
            ));
        };

        // External requests carry their own per-request timeout.
        if link.is_external() {
            return checker.check(&link.target, &link.context).await;
        }

        let timeout = self.config.timeout_for(&link.link_type);
        match tokio::time::timeout(timeout, checker.check(&link.target, &link.context)).await {
            Ok(response) => response,
            Err(_) => LinkTargetResponse::unknown(format!(
                "Check timed out after {}s",
                timeout.as_secs()
            ))
            .with_url_checker(checker.name()),
        }
    }

    async fn store(&self, link: &LinkTarget, response: &LinkTargetResponse) {
        if let Err(err) = self
            .cache
            .set_result(&link.target, &link.link_type, response)
            .await
        {
            warn!("Failed to cache result for {}: {}", link.target, err);
        }
    }

    /// 更新统计并记录失效链接
    async fn finish(
        &self,
        link: &LinkTarget,
        response: LinkTargetResponse,
        from_cache: bool,
        was_broken: bool,
        run: &CheckRun,
    ) -> LinkCheckResult {
        let status = response.status();
        run.statistics.increment_count_links_by_status(status);
        if !from_cache && response.is_broken() && !was_broken {
            run.statistics.increment_new_broken_link();
        }
        metrics::counter!("linkwatch_links_checked_total", "status" => status.to_string())
            .increment(1);

        if BrokenLinkRecord::should_record(&response) {
            let record = BrokenLinkRecord::new(run.run_id, link, &response);
            if let Err(err) = self.broken_links.create(&record).await {
                warn!("Failed to store broken link {}: {}", link.target, err);
            }
            run.push_broken_link(record);
        }

        let result = LinkCheckResult {
            link: link.clone(),
            response,
            from_cache,
        };
        run.push_result(result.clone());
        result
    }
}

#[cfg(test)]
#[path = "link_checker_test.rs"]
mod tests;
