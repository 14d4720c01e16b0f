// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bise_results::config::settings::Settings;
use bise_results::engines::result_fetcher::ResultFetcher;
use bise_results::infrastructure::metrics::init_metrics;
use bise_results::presentation::routes;
use bise_results::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting bise-results...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Metrics exporter
    if settings.metrics.enabled {
        init_metrics(&settings.metrics.listen_addr)?;
    }

    // 4. Initialize fetch executor
    let fetcher = Arc::new(ResultFetcher::with_reqwest(settings.upstream.clone())?);
    info!(
        "Fetching from {} (proxy {}), {} retries",
        settings.upstream.result_url_template,
        settings.upstream.proxy_prefix,
        settings.upstream.max_retries
    );

    // 5. Start HTTP server
    let app = routes::app(fetcher, settings.server.static_dir.as_deref());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    let public_host = &settings.client.hostname;
    info!("Server listening on {}", addr);
    info!(
        "- API: http://{}:{}/api/result/{{roll-number}}",
        public_host, settings.server.port
    );
    if settings.server.static_dir.is_some() {
        info!("- Frontend: http://{}:{}/", public_host, settings.server.port);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
