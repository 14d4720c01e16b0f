// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::fetch::FetchOutcome;
use serde::{Deserialize, Serialize};

/// 成绩接口响应
///
/// 成功时为 `{ rollNumber, result }`，失败时为 `{ rollNumber, error, errorDetail }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponseDto {
    /// 准考证号
    pub roll_number: u64,
    /// 上游原始HTML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// 错误描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 错误详情
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl From<FetchOutcome> for ResultResponseDto {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success { id, html } => Self {
                roll_number: id,
                result: Some(html),
                error: None,
                error_detail: None,
            },
            FetchOutcome::Failure { id, kind, detail } => Self {
                roll_number: id,
                result: None,
                error: Some(kind.message()),
                error_detail: Some(detail),
            },
        }
    }
}
