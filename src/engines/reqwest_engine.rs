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

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，重定向次数在构建时固定
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建引擎
    ///
    /// # 参数
    ///
    /// * `max_redirects` - 最多跟随的重定向次数
    pub fn new(max_redirects: usize) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResponse)` - 抓取响应（包括非 2xx）
    /// * `Err(EngineError)` - 没有拿到完整响应
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        // Build headers
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            if let (Ok(k), Ok(v)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                headers.insert(k, v);
            }
        }

        let start = Instant::now();
        let response = self
            .client
            .get(&request.url)
            .headers(headers)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| classify(e, request))?;

        let status = response.status();
        // A received status outranks a body that cannot be read
        let content = if status.is_success() {
            response.text().await.map_err(|e| classify(e, request))?
        } else {
            response.text().await.unwrap_or_else(|e| {
                debug!("Discarding unreadable {} body from {}: {}", status, request.url, e);
                String::new()
            })
        };

        debug!(
            "GET {} -> {} ({} bytes, {}ms)",
            request.url,
            status.as_u16(),
            content.len(),
            start.elapsed().as_millis()
        );

        Ok(ScrapeResponse {
            status_code: status.as_u16(),
            content,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

fn classify(error: reqwest::Error, request: &ScrapeRequest) -> EngineError {
    if error.is_timeout() {
        EngineError::Timeout(request.timeout)
    } else {
        EngineError::RequestFailed(error)
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
