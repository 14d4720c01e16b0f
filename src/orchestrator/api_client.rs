// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::{
    health_response::HealthResponseDto, result_response::ResultResponseDto,
};
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// 成绩接口调用错误
#[derive(Error, Debug)]
pub enum ClientError {
    /// 成绩接口本身返回非 2xx
    #[error("Server responded with status {0}")]
    Status(u16),
    /// 网络错误或响应体无法解析
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    /// API 基础地址无效
    #[error("Invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// 成绩接口客户端特质
#[async_trait]
pub trait ResultApi: Send + Sync {
    /// 健康检查
    async fn health(&self) -> Result<HealthResponseDto, ClientError>;

    /// 查询单个准考证号
    async fn fetch_result(&self, id: u64, use_proxy: bool)
        -> Result<ResultResponseDto, ClientError>;
}

/// 基于 reqwest 的成绩接口客户端
pub struct HttpResultApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResultApi {
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// * `base_url` - 服务端绝对地址，不含 `/api`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn result_url(&self, id: u64, use_proxy: bool) -> String {
        let mut url = format!("{}/api/result/{}", self.base_url, id);
        if use_proxy {
            url.push_str("?proxy=true");
        }
        url
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }
}

#[async_trait]
impl ResultApi for HttpResultApi {
    async fn health(&self) -> Result<HealthResponseDto, ClientError> {
        let response = self.client.get(self.health_url()).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn fetch_result(
        &self,
        id: u64,
        use_proxy: bool,
    ) -> Result<ResultResponseDto, ClientError> {
        let response = self
            .client
            .get(self.result_url(id, use_proxy))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}
