// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::result_fetcher::ResultFetcher;
use crate::presentation::handlers::{health_handler, result_handler};
use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// 创建 API 路由
///
/// # 返回值
///
/// 挂载在 `/api` 下的路由，未匹配的 API 路径返回 404 而不会落到前端页面
pub fn routes() -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_handler::health_check))
        .route("/result/{roll}", get(result_handler::get_result))
        .fallback(api_not_found);

    Router::new().nest("/api", api_routes)
}

/// 创建完整应用
///
/// # 参数
///
/// * `fetcher` - 成绩抓取执行器
/// * `static_dir` - 前端构建产物目录，设置后非 API 路径回落到其中的 `index.html`
pub fn app(fetcher: Arc<ResultFetcher>, static_dir: Option<&str>) -> Router {
    let mut router = routes();

    if let Some(dir) = static_dir {
        let index = Path::new(dir).join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(Extension(fetcher))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("No API route for {}", uri.path()) })),
    )
}
