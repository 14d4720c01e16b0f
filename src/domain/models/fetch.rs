// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::UpstreamSettings;
use std::fmt;

/// 单次抓取请求
///
/// 每次尝试创建一个，只在一次HTTP调用期间存在，不做持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// 准考证号
    pub id: u64,
    /// 第几次尝试（从0开始）
    pub attempt: u32,
    /// 是否通过 CORS 中继转发
    pub use_proxy: bool,
}

impl FetchRequest {
    /// 创建首次尝试的请求
    pub fn initial(id: u64, use_proxy: bool) -> Self {
        Self {
            id,
            attempt: 0,
            use_proxy,
        }
    }

    /// 进入下一次重试
    ///
    /// 从第一次重试开始代理模式保持开启
    pub fn escalate(&self) -> Self {
        Self {
            id: self.id,
            attempt: self.attempt + 1,
            use_proxy: true,
        }
    }

    /// 本次尝试是否走中继
    pub fn routes_through_proxy(&self) -> bool {
        self.use_proxy || self.attempt > 0
    }

    /// 直连成绩页地址
    pub fn direct_url(&self, upstream: &UpstreamSettings) -> String {
        upstream
            .result_url_template
            .replace("{id}", &self.id.to_string())
    }

    /// 本次尝试实际请求的地址
    pub fn target_url(&self, upstream: &UpstreamSettings) -> String {
        let direct = self.direct_url(upstream);
        if self.routes_through_proxy() {
            format!("{}{}", upstream.proxy_prefix, urlencoding::encode(&direct))
        } else {
            direct
        }
    }
}

/// 抓取失败分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 上游返回 403
    Forbidden,
    /// 上游返回其他非 2xx 状态码
    UpstreamStatus(u16),
    /// 请求已发出但没有收到响应（网络错误、超时）
    NoResponse,
    /// 其他错误
    Unknown,
}

impl ErrorKind {
    /// 根据上游状态码分类
    pub fn from_status(status_code: u16) -> Self {
        if status_code == 403 {
            ErrorKind::Forbidden
        } else {
            ErrorKind::UpstreamStatus(status_code)
        }
    }

    /// 面向用户的错误描述
    pub fn message(&self) -> String {
        match self {
            ErrorKind::Forbidden => {
                "Access forbidden. The server is blocking our requests.".to_string()
            }
            ErrorKind::UpstreamStatus(code) => format!("Server responded with status {}.", code),
            ErrorKind::NoResponse => "No response received from server.".to_string(),
            ErrorKind::Unknown => "Error fetching data.".to_string(),
        }
    }

    /// 指标标签
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::UpstreamStatus(_) => "upstream_status",
            ErrorKind::NoResponse => "no_response",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// 抓取结果
///
/// 要么是原始HTML，要么是分类后的终态错误，两者只会出现一个。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success {
        id: u64,
        html: String,
    },
    Failure {
        id: u64,
        kind: ErrorKind,
        detail: String,
    },
}
