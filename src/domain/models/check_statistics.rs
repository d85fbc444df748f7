// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::link_target_response::CheckStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// 检查运行统计
///
/// 所有计数器都是原子类型，可以在并发检查任务之间共享而不丢失更新
#[derive(Debug, Default)]
pub struct CheckStatistics {
    count_pages: AtomicU64,
    count_links_total: AtomicU64,
    count_ok: AtomicU64,
    count_broken: AtomicU64,
    count_cannot_check: AtomicU64,
    count_excluded: AtomicU64,
    count_unknown: AtomicU64,
    count_new_broken_links: AtomicU64,
    check_start_time: AtomicI64,
    check_end_time: AtomicI64,
}

/// 统计快照，供报告使用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatisticsSnapshot {
    pub count_pages: u64,
    pub count_links_total: u64,
    pub count_links_checked: u64,
    pub count_links_by_status: BTreeMap<String, u64>,
    pub percent_links_by_status: BTreeMap<String, f64>,
    pub count_new_broken_links: u64,
    pub check_start_time: i64,
    pub check_end_time: i64,
}

impl CheckStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, status: CheckStatus) -> Option<&AtomicU64> {
        match status {
            CheckStatus::Ok => Some(&self.count_ok),
            CheckStatus::Broken => Some(&self.count_broken),
            CheckStatus::CannotCheck => Some(&self.count_cannot_check),
            CheckStatus::Excluded => Some(&self.count_excluded),
            CheckStatus::Unknown => Some(&self.count_unknown),
            CheckStatus::All => None,
        }
    }

    /// 记录检查开始时间
    pub fn start(&self, timestamp: i64) {
        self.check_start_time.store(timestamp, Ordering::Relaxed);
    }

    /// 记录检查结束时间
    pub fn finish(&self, timestamp: i64) {
        self.check_end_time.store(timestamp, Ordering::Relaxed);
    }

    pub fn set_count_pages(&self, count: u64) {
        self.count_pages.store(count, Ordering::Relaxed);
    }

    /// 增加状态计数，同时增加总数
    ///
    /// `All` 仅用作过滤条件，不计数
    pub fn increment_count_links_by_status(&self, status: CheckStatus) {
        if let Some(counter) = self.counter(status) {
            counter.fetch_add(1, Ordering::Relaxed);
            self.count_links_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_new_broken_link(&self) {
        self.count_new_broken_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count_pages(&self) -> u64 {
        self.count_pages.load(Ordering::Relaxed)
    }

    pub fn count_links_total(&self) -> u64 {
        self.count_links_total.load(Ordering::Relaxed)
    }

    pub fn count_new_broken_links(&self) -> u64 {
        self.count_new_broken_links.load(Ordering::Relaxed)
    }

    pub fn check_start_time(&self) -> i64 {
        self.check_start_time.load(Ordering::Relaxed)
    }

    pub fn check_end_time(&self) -> i64 {
        self.check_end_time.load(Ordering::Relaxed)
    }

    /// 获取指定状态的链接数，`All` 返回总数
    pub fn count_links_by_status(&self, status: CheckStatus) -> u64 {
        match self.counter(status) {
            Some(counter) => counter.load(Ordering::Relaxed),
            None => self.count_links_total(),
        }
    }

    /// 实际检查的链接数：总数减去排除和无法检查的链接
    pub fn count_links_checked(&self) -> u64 {
        self.count_links_total()
            .saturating_sub(self.count_links_by_status(CheckStatus::Excluded))
            .saturating_sub(self.count_links_by_status(CheckStatus::CannotCheck))
    }

    /// 指定状态占已检查链接的百分比
    pub fn percent_links_by_status(&self, status: CheckStatus) -> f64 {
        let checked = self.count_links_checked();
        let count = self.count_links_by_status(status);
        if checked == 0 || count == 0 {
            return 0.0;
        }
        count as f64 / checked as f64 * 100.0
    }

    pub fn snapshot(&self) -> CheckStatisticsSnapshot {
        let mut count_links_by_status = BTreeMap::new();
        let mut percent_links_by_status = BTreeMap::new();
        for status in CheckStatus::RESULTS {
            count_links_by_status.insert(status.to_string(), self.count_links_by_status(status));
            percent_links_by_status.insert(status.to_string(), self.percent_links_by_status(status));
        }

        CheckStatisticsSnapshot {
            count_pages: self.count_pages(),
            count_links_total: self.count_links_total(),
            count_links_checked: self.count_links_checked(),
            count_links_by_status,
            percent_links_by_status,
            count_new_broken_links: self.count_new_broken_links(),
            check_start_time: self.check_start_time(),
            check_end_time: self.check_end_time(),
        }
    }
}
