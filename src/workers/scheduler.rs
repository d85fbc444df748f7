// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::link_target::LinkTarget;
use crate::domain::services::link_checker::{CheckRun, LinkChecker};
use crate::utils::errors::LinkCheckError;
use crate::utils::url_utils::{extract_domain, preprocess_url};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// 检查调度器
///
/// 按域名分区：同一域名的目标由一个工作器顺序处理，不同域名并行处理，
/// 并发数受工作池大小限制。内部链接按链接类型分区。
pub struct CheckScheduler {
    checker: Arc<LinkChecker>,
    pool_size: usize,
}

impl CheckScheduler {
    pub fn new(checker: Arc<LinkChecker>, pool_size: usize) -> Self {
        Self {
            checker,
            pool_size: pool_size.max(1),
        }
    }

    /// 调度所有目标并等待完成
    ///
    /// 运行被取消后不再发起新的检查，已经开始的检查会完成。
    /// 出现致命错误时停止所有分区并返回第一个错误。
    pub async fn schedule(
        &self,
        links: Vec<LinkTarget>,
        run: Arc<CheckRun>,
    ) -> Result<(), LinkCheckError> {
        let partitions = partition(links);
        debug!("Scheduling {} partitions", partitions.len());

        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let stop = run.cancel.child_token();
        let mut workers = JoinSet::new();

        for (key, links) in partitions {
            let checker = self.checker.clone();
            let run = run.clone();
            let semaphore = semaphore.clone();
            let stop = stop.clone();

            workers.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| LinkCheckError::Cancelled)?;

                for link in links {
                    if stop.is_cancelled() {
                        debug!("Partition {} stopped", key);
                        break;
                    }
                    match checker.check_target(&link, &run).await {
                        Ok(_) => {}
                        Err(LinkCheckError::Cancelled) => break,
                        Err(err) => {
                            stop.cancel();
                            return Err(err);
                        }
                    }
                }
                Ok::<(), LinkCheckError>(())
            });
        }

        let mut first_error = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!("Link check run {} aborted: {}", run.run_id, err);
                    first_error.get_or_insert(err);
                }
                Err(err) => error!("Check worker failed: {}", err),
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// 计算目标所属分区
pub fn partition_key(link: &LinkTarget) -> String {
    if link.is_external() {
        let domain = extract_domain(&preprocess_url(&link.target)).unwrap_or_default();
        format!("{}:{}", link.link_type, domain)
    } else {
        link.link_type.clone()
    }
}

fn partition(links: Vec<LinkTarget>) -> BTreeMap<String, Vec<LinkTarget>> {
    let mut partitions: BTreeMap<String, Vec<LinkTarget>> = BTreeMap::new();
    for link in links {
        partitions.entry(partition_key(&link)).or_default().push(link);
    }
    partitions
}
