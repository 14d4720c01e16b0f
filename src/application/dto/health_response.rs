// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 健康检查响应
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponseDto {
    /// 固定为 "ok"
    pub status: String,
    /// 服务器当前时间（ISO-8601）
    pub time: String,
}

impl HealthResponseDto {
    pub fn now() -> Self {
        Self {
            status: "ok".to_string(),
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
