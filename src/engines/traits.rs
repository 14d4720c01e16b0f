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

use crate::domain::models::fetch::ErrorKind;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("{0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 上游返回非 2xx 状态码
    #[error("Request failed with status code {status_code}")]
    Status { status_code: u16 },
    /// 在超时时间内没有拿到响应
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl EngineError {
    /// 将错误归类为终态错误类型
    ///
    /// 有响应的按状态码分类，请求已发出却没有响应的归为 `NoResponse`
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::RequestFailed(e) => {
                if let Some(status) = e.status() {
                    ErrorKind::from_status(status.as_u16())
                } else if e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() {
                    ErrorKind::NoResponse
                } else {
                    ErrorKind::Unknown
                }
            }
            EngineError::Status { status_code } => ErrorKind::from_status(*status_code),
            EngineError::Timeout(_) => ErrorKind::NoResponse,
        }
    }
}

/// 抓取请求
pub struct ScrapeRequest {
    /// 目标URL
    pub url: String,
    /// 请求头
    pub headers: HashMap<String, String>,
    /// 超时时间
    pub timeout: Duration,
}

/// 抓取响应
pub struct ScrapeResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容，非 2xx 且读取失败时为空
    pub content: String,
}

impl ScrapeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// 抓取引擎特质
#[async_trait]
pub trait ScraperEngine: Send + Sync {
    /// 执行抓取
    ///
    /// 非 2xx 响应同样以 `Ok` 返回，由调用方决定如何处理
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
