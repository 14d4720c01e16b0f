// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use bise_results::config::settings::UpstreamSettings;
use bise_results::engines::result_fetcher::ResultFetcher;
use bise_results::presentation::routes;
use std::sync::Arc;
use tower::util::ServiceExt;

async fn get_text(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

#[tokio::test]
async fn non_api_routes_fall_back_to_index() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>app</html>").unwrap();
    std::fs::write(dist.path().join("app.js"), "console.log(1)").unwrap();

    let fetcher = Arc::new(ResultFetcher::with_reqwest(UpstreamSettings::default()).unwrap());
    let app = routes::app(fetcher, dist.path().to_str());

    let (status, body) = get_text(app.clone(), "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log(1)");

    let (status, body) = get_text(app.clone(), "/results/page").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>app</html>");

    let (status, _) = get_text(app, "/api/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
