// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 应用错误类型
///
/// 成绩接口在执行器之外出现的错误，统一以 `{ rollNumber, error, errorDetail }` 返回
#[derive(Debug, Error)]
pub enum AppError {
    /// 准考证号不是非负整数
    #[error("Invalid roll number")]
    InvalidRollNumber { roll_number: String, detail: String },
    /// 抓取任务意外失败
    #[error("Server error while fetching data")]
    Internal { roll_number: u64, detail: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_message = self.to_string();

        let (status, body) = match self {
            AppError::InvalidRollNumber {
                roll_number,
                detail,
            } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "rollNumber": roll_number,
                    "error": error_message,
                    "errorDetail": detail,
                }),
            ),
            AppError::Internal {
                roll_number,
                detail,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "rollNumber": roll_number,
                    "error": error_message,
                    "errorDetail": detail,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
