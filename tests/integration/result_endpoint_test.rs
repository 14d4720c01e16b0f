// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{direct_url, get_json, test_app, upstream_for};
use async_trait::async_trait;
use axum::http::StatusCode;
use bise_results::config::settings::UpstreamSettings;
use bise_results::engines::result_fetcher::ResultFetcher;
use bise_results::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use bise_results::presentation::routes;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn returns_raw_upstream_html() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results/409360.html"))
        .and(header("Sec-Fetch-Mode", "navigate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>OK</html>"))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get_json(test_app(upstream_for(&upstream)), "/api/result/409360").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "rollNumber": 409360, "result": "<html>OK</html>" })
    );
}

#[tokio::test]
async fn falls_back_to_proxy_when_blocked() {
    let upstream = MockServer::start().await;
    Mock::given(path("/results/7.html"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(path("/proxy"))
        .and(query_param("url", direct_url(&upstream, 7)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>via proxy</html>"))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get_json(test_app(upstream_for(&upstream)), "/api/result/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "<html>via proxy</html>");
}

#[tokio::test]
async fn exhausted_retries_report_forbidden_with_200() {
    let upstream = MockServer::start().await;
    Mock::given(path("/results/8.html"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(path("/proxy"))
        .respond_with(ResponseTemplate::new(403))
        .expect(3)
        .mount(&upstream)
        .await;

    let (status, body) = get_json(test_app(upstream_for(&upstream)), "/api/result/8").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rollNumber"], 8);
    assert_eq!(
        body["error"],
        "Access forbidden. The server is blocking our requests."
    );
    assert!(body["errorDetail"].as_str().unwrap().contains("403"));
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn forbidden_with_undecodable_body_is_still_forbidden() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("content-encoding", "gzip")
                .set_body_string("this is not gzip"),
        )
        .mount(&upstream)
        .await;

    let (status, body) = get_json(test_app(upstream_for(&upstream)), "/api/result/5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["error"],
        "Access forbidden. The server is blocking our requests."
    );
}

#[tokio::test]
async fn other_statuses_are_reported_with_their_code() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let (_, body) = get_json(test_app(upstream_for(&upstream)), "/api/result/9").await;

    assert_eq!(body["error"], "Server responded with status 404.");
}

#[tokio::test]
async fn proxy_query_skips_direct_request() {
    let upstream = MockServer::start().await;
    Mock::given(path("/results/10.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    Mock::given(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxied</html>"))
        .expect(1)
        .mount(&upstream)
        .await;

    let (_, body) = get_json(
        test_app(upstream_for(&upstream)),
        "/api/result/10?proxy=true",
    )
    .await;

    assert_eq!(body["result"], "<html>proxied</html>");
}

#[tokio::test]
async fn repeated_proxy_flag_goes_direct() {
    let upstream = MockServer::start().await;
    Mock::given(path("/results/13.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>direct</html>"))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(path("/proxy"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let (status, body) = get_json(
        test_app(upstream_for(&upstream)),
        "/api/result/13?proxy=true&proxy=false",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "<html>direct</html>");
}

#[tokio::test]
async fn unreachable_upstream_reports_no_response() {
    let upstream = MockServer::start().await;
    let mut settings = upstream_for(&upstream);
    settings.max_retries = 1;
    // Nothing listens on port 9 locally
    settings.result_url_template = "http://127.0.0.1:9/results/{id}.html".to_string();
    settings.proxy_prefix = "http://127.0.0.1:9/proxy?url=".to_string();

    let (status, body) = get_json(test_app(settings), "/api/result/11").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "No response received from server.");
}

#[tokio::test]
async fn invalid_roll_number_is_rejected() {
    let (status, body) = get_json(test_app(UpstreamSettings::default()), "/api/result/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["rollNumber"], "abc");
    assert_eq!(body["error"], "Invalid roll number");
}

struct PanickingEngine;

#[async_trait]
impl ScraperEngine for PanickingEngine {
    async fn scrape(&self, _request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        panic!("unexpected internal fault");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[tokio::test]
async fn internal_fault_is_answered_with_500() {
    let fetcher = Arc::new(ResultFetcher::new(
        Arc::new(PanickingEngine),
        UpstreamSettings::default(),
    ));
    let app = routes::app(fetcher, None);

    let (status, body) = get_json(app, "/api/result/12").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["rollNumber"], 12);
    assert_eq!(body["error"], "Server error while fetching data");
    assert!(body["errorDetail"].as_str().is_some());
}

/// 总是返回 500 并计数的引擎
#[derive(Default)]
struct CountingEngine {
    calls: AtomicUsize,
}

#[async_trait]
impl ScraperEngine for CountingEngine {
    async fn scrape(&self, _request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ScrapeResponse {
            status_code: 500,
            content: String::new(),
        })
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

#[tokio::test(start_paused = true)]
async fn dropped_request_stops_retrying() {
    let engine = Arc::new(CountingEngine::default());
    let fetcher = Arc::new(ResultFetcher::new(
        engine.clone(),
        UpstreamSettings::default(),
    ));
    let app = routes::app(fetcher, None);

    // Give up on the request while the fetch waits out its first backoff
    let request = get_json(app, "/api/result/14");
    assert!(tokio::time::timeout(Duration::from_millis(500), request)
        .await
        .is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
}
