// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;

use crate::application::dto::health_response::HealthResponseDto;

/// 健康检查端点
///
/// 与抓取执行器无关，只报告存活状态和服务器时间
pub async fn health_check() -> Json<HealthResponseDto> {
    Json(HealthResponseDto::now())
}
