// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::result_record::ResultRecord;
use crate::orchestrator::accumulator::Accumulator;
use crate::orchestrator::api_client::ResultApi;
use crate::orchestrator::batch::{progress_percent, Batches};
use crate::orchestrator::render;
use futures::future::join_all;
use futures::stream::{self, Stream, StreamExt};
use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// 编排错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrchestratorError {
    /// 批大小必须大于0
    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
    /// 区间末尾超出准考证号上限
    #[error("Range of {total} roll numbers starting at {start_id} overflows")]
    RangeOverflow { start_id: u64, total: u64 },
}

/// 每批完成后的进度快照
#[derive(Debug, Clone)]
pub struct RunProgress {
    /// 第几批（从1开始）
    pub batch: u64,
    /// 批次总数
    pub total_batches: u64,
    /// 本批的准考证号区间
    pub batch_ids: Range<u64>,
    /// 已累积的记录数
    pub completed: u64,
    /// 本次运行请求的总数
    pub total: u64,
    /// 进度百分比，最多 100
    pub percent: f64,
    /// 当前累积器快照
    pub accumulator: Accumulator,
}

/// 批量编排器
///
/// 批内并发请求成绩接口，批间严格顺序执行，峰值并发等于批大小。
/// 单个准考证号的任何失败都只会变成该准考证号的错误记录。
pub struct BatchOrchestrator<A: ResultApi + 'static> {
    api: Arc<A>,
    use_proxy: bool,
}

struct RunState<A: ResultApi + 'static> {
    api: Arc<A>,
    use_proxy: bool,
    batches: Batches,
    total_batches: u64,
    batch_index: u64,
    total: u64,
    accumulator: Accumulator,
    health_checked: bool,
}

impl<A: ResultApi + 'static> BatchOrchestrator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            use_proxy: false,
        }
    }

    /// 让每个请求都带上 `proxy=true`
    pub fn with_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = use_proxy;
        self
    }

    /// 开始一次运行
    ///
    /// 返回惰性的进度流，每完成一批产出一个快照。每次调用都从空的累积器开始。
    ///
    /// # 参数
    ///
    /// * `start_id` - 起始准考证号
    /// * `total` - 抓取数量
    /// * `batch_size` - 批大小（即峰值并发）
    pub fn run(
        &self,
        start_id: u64,
        total: u64,
        batch_size: usize,
    ) -> Result<impl Stream<Item = RunProgress> + Send + 'static, OrchestratorError> {
        if batch_size == 0 {
            return Err(OrchestratorError::InvalidBatchSize);
        }

        let end = start_id
            .checked_add(total)
            .ok_or(OrchestratorError::RangeOverflow { start_id, total })?;

        let batches = Batches::new(start_id..end, batch_size);
        info!(
            "Starting run for roll numbers {}..{} in {} batches of {}",
            start_id,
            end,
            batches.count_total(),
            batch_size
        );

        let state = RunState {
            api: self.api.clone(),
            use_proxy: self.use_proxy,
            total_batches: batches.count_total(),
            batches,
            batch_index: 0,
            total,
            accumulator: Accumulator::new(),
            health_checked: false,
        };

        Ok(stream::unfold(state, |mut state| async move {
            let batch_ids = state.batches.next()?;

            if !state.health_checked {
                state.health_checked = true;
                spawn_health_check(state.api.clone());
            }

            let records =
                fetch_batch(state.api.as_ref(), batch_ids.clone(), state.use_proxy).await;
            state.accumulator.merge(records);
            state.batch_index += 1;

            let completed = state.accumulator.len() as u64;
            let progress = RunProgress {
                batch: state.batch_index,
                total_batches: state.total_batches,
                batch_ids,
                completed,
                total: state.total,
                percent: progress_percent(completed, state.total),
                accumulator: state.accumulator.clone(),
            };
            debug!(
                "Batch {}/{} merged, {:.0}% complete",
                progress.batch, progress.total_batches, progress.percent
            );

            Some((progress, state))
        }))
    }

    /// 运行到结束并返回最终累积器
    pub async fn run_to_completion(
        &self,
        start_id: u64,
        total: u64,
        batch_size: usize,
    ) -> Result<Accumulator, OrchestratorError> {
        let progress = self.run(start_id, total, batch_size)?;
        let last = progress.fold(None, |_, p| async move { Some(p) }).await;
        Ok(last.map(|p| p.accumulator).unwrap_or_default())
    }
}

/// 后台健康检查，失败只记录日志
fn spawn_health_check<A: ResultApi + 'static>(api: Arc<A>) {
    tokio::spawn(async move {
        match api.health().await {
            Ok(health) => info!("API health check: {} at {}", health.status, health.time),
            Err(e) => warn!("API health check failed: {}", e),
        }
    });
}

/// 并发请求一批准考证号，等待全部完成
///
/// 每个请求独立处理自己的错误，不会影响同批其他请求
async fn fetch_batch<A: ResultApi + ?Sized>(
    api: &A,
    ids: Range<u64>,
    use_proxy: bool,
) -> Vec<ResultRecord> {
    join_all(ids.map(|id| async move {
        match api.fetch_result(id, use_proxy).await {
            Ok(response) => render::record_from_response(id, response),
            Err(e) => {
                warn!("Request for roll number {} failed: {}", id, e);
                render::transport_error_record(id, &e.to_string())
            }
        }
    }))
    .await
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
