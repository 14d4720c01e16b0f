// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{get_json, test_app};
use axum::http::StatusCode;
use bise_results::config::settings::UpstreamSettings;

/// 健康检查测试
///
/// 验证健康检查端点不依赖上游即可返回状态和服务器时间
#[tokio::test]
async fn health_check_works() {
    let app = test_app(UpstreamSettings::default());

    let (status, body) = get_json(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let time = body["time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
}

/// 未知 API 路径返回 404
#[tokio::test]
async fn unknown_api_route_returns_404() {
    let app = test_app(UpstreamSettings::default());

    let (status, body) = get_json(app, "/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("/api/unknown"));
}
