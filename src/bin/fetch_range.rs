// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use bise_results::config::settings::Settings;
use bise_results::orchestrator::api_client::HttpResultApi;
use bise_results::orchestrator::runner::BatchOrchestrator;
use bise_results::utils::telemetry;
use clap::Parser;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 按准考证号区间批量抓取成绩
#[derive(Debug, Parser)]
#[command(name = "fetch-range", version, about)]
struct Args {
    /// 起始准考证号（默认取配置 client.default_start_id）
    #[arg(long)]
    start: Option<u64>,

    /// 抓取数量（默认取配置 client.default_total）
    #[arg(long)]
    total: Option<u64>,

    /// 批大小（默认取配置 client.batch_size）
    #[arg(long)]
    batch_size: Option<usize>,

    /// 要求服务端从第一次请求就走中继
    #[arg(long)]
    proxy: bool,

    /// 服务端地址（默认根据配置中的主机名解析）
    #[arg(long, env = "BISE_RESULTS_API_BASE")]
    api_base: Option<String>,

    /// 把最终记录写成 JSON 文件
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    let args = Args::parse();
    let settings = Settings::new()?;

    let start = args.start.unwrap_or(settings.client.default_start_id);
    let total = args.total.unwrap_or(settings.client.default_total);
    let batch_size = args.batch_size.unwrap_or(settings.client.batch_size);
    let api_base = args
        .api_base
        .unwrap_or_else(|| settings.client.absolute_api_base());
    info!("Using API at {}", api_base);

    let api = HttpResultApi::new(&api_base)?;
    let orchestrator = BatchOrchestrator::new(Arc::new(api)).with_proxy(args.proxy);

    let mut progress = Box::pin(orchestrator.run(start, total, batch_size)?);
    let mut last = None;
    while let Some(p) = progress.next().await {
        println!(
            "[{:>3.0}%] batch {}/{} ({}..{}) - {} of {} records",
            p.percent,
            p.batch,
            p.total_batches,
            p.batch_ids.start,
            p.batch_ids.end,
            p.completed,
            p.total
        );
        last = Some(p);
    }

    let records = last
        .map(|p| p.accumulator.into_records())
        .unwrap_or_default();
    info!("Run finished with {} records", records.len());

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {} records to {}", records.len(), path.display());
    }

    Ok(())
}
