// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::UpstreamSettings;
use crate::domain::models::fetch::{FetchOutcome, FetchRequest};
use crate::engines::impersonation::browser_headers;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{EngineError, ScrapeRequest, ScraperEngine};
use crate::utils::retry_policy::RetryPolicy;
use metrics::counter;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 成绩抓取执行器
///
/// 对单个准考证号发起请求，失败时按固定间隔重试，从第一次重试起改走 CORS 中继。
/// 每次调用互相独立，可以对不同准考证号并发调用。
pub struct ResultFetcher {
    engine: Arc<dyn ScraperEngine>,
    upstream: UpstreamSettings,
    policy: RetryPolicy,
}

impl ResultFetcher {
    pub fn new(engine: Arc<dyn ScraperEngine>, upstream: UpstreamSettings) -> Self {
        let policy = RetryPolicy::from(&upstream);
        Self {
            engine,
            upstream,
            policy,
        }
    }

    /// 使用 reqwest 引擎创建执行器
    pub fn with_reqwest(upstream: UpstreamSettings) -> Result<Self, EngineError> {
        let engine = ReqwestEngine::new(upstream.max_redirects)?;
        Ok(Self::new(Arc::new(engine), upstream))
    }

    /// 抓取一个准考证号的成绩页
    ///
    /// # 参数
    ///
    /// * `id` - 准考证号
    /// * `use_proxy` - 首次尝试是否就走中继
    ///
    /// # 返回值
    ///
    /// 成功时返回原始HTML；重试耗尽后返回分类后的错误，不会向外抛出
    pub async fn fetch(&self, id: u64, use_proxy: bool) -> FetchOutcome {
        let mut request = FetchRequest::initial(id, use_proxy);

        loop {
            info!(
                "Fetching result for roll number {} via {}, attempt {}/{}",
                id,
                self.engine.name(),
                request.attempt + 1,
                self.policy.max_attempts()
            );
            counter!("fetch_attempts_total").increment(1);

            let err = match self.attempt(&request).await {
                Ok(html) => {
                    counter!("fetch_outcomes_total", "outcome" => "success").increment(1);
                    return FetchOutcome::Success { id, html };
                }
                Err(e) => e,
            };
            warn!("Error fetching roll number {}: {}", id, err);

            if !self.policy.should_retry(request.attempt) {
                let kind = err.kind();
                error!(
                    "Giving up on roll number {} after {} attempts: {}",
                    id,
                    request.attempt + 1,
                    kind
                );
                counter!("fetch_outcomes_total", "outcome" => kind.label()).increment(1);
                return FetchOutcome::Failure {
                    id,
                    kind,
                    detail: err.to_string(),
                };
            }

            let next = request.escalate();
            let delay = self.policy.backoff();
            info!("Retrying roll number {} in {:?}...", id, delay);
            tokio::time::sleep(delay).await;

            if !request.routes_through_proxy() {
                info!("Switching to proxy for roll number {}", id);
            }
            request = next;
        }
    }

    async fn attempt(&self, request: &FetchRequest) -> Result<String, EngineError> {
        let scrape = ScrapeRequest {
            url: request.target_url(&self.upstream),
            headers: browser_headers(&self.upstream.referer),
            timeout: self.upstream.timeout(),
        };

        let response = self.engine.scrape(&scrape).await?;
        if !response.is_success() {
            return Err(EngineError::Status {
                status_code: response.status_code,
            });
        }

        Ok(response.content)
    }
}

#[cfg(test)]
#[path = "result_fetcher_test.rs"]
mod tests;
