// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bise_results::config::settings::UpstreamSettings;
use bise_results::engines::result_fetcher::ResultFetcher;
use bise_results::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::util::ServiceExt;
use wiremock::MockServer;

/// 指向模拟上游的配置，重试不等待
pub fn upstream_for(mock: &MockServer) -> UpstreamSettings {
    UpstreamSettings {
        result_url_template: format!("{}/results/{{id}}.html", mock.uri()),
        proxy_prefix: format!("{}/proxy?url=", mock.uri()),
        referer: format!("{}/", mock.uri()),
        timeout_secs: 1,
        max_redirects: 5,
        max_retries: 3,
        retry_delay_ms: 0,
    }
}

/// 模拟上游中某个准考证号的直连地址
pub fn direct_url(mock: &MockServer, id: u64) -> String {
    format!("{}/results/{}.html", mock.uri(), id)
}

pub fn test_app(upstream: UpstreamSettings) -> Router {
    let fetcher = Arc::new(ResultFetcher::with_reqwest(upstream).unwrap());
    routes::app(fetcher, None)
}

/// 在随机端口启动服务，返回基础地址
pub async fn spawn_app(upstream: UpstreamSettings) -> String {
    let app = test_app(upstream);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// 发送一个 GET 请求并把响应体解析为 JSON
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
