// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::UpstreamSettings;
use std::time::Duration;

/// 重试策略配置
///
/// 每次重试前等待固定的间隔
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数
    pub max_retries: u32,
    /// 重试间隔
    pub delay: Duration,
}

impl RetryPolicy {
    /// 创建固定间隔重试策略
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// 重试前的退避时间
    pub fn backoff(&self) -> Duration {
        self.delay
    }

    /// 是否应该重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// 总尝试次数
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl From<&UpstreamSettings> for RetryPolicy {
    fn from(upstream: &UpstreamSettings) -> Self {
        Self::fixed(upstream.max_retries, upstream.retry_delay())
    }
}
