// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Path, RawQuery};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    application::dto::{result_query::ResultQueryDto, result_response::ResultResponseDto},
    engines::result_fetcher::ResultFetcher,
    presentation::errors::AppError,
};

/// 成绩查询端点
///
/// 每个请求调用一次抓取执行器。上游抓取失败也以 200 返回错误记录，
/// 只有执行器之外的故障（例如抓取任务 panic）才返回 500。
pub async fn get_result(
    Extension(fetcher): Extension<Arc<ResultFetcher>>,
    Path(roll): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ResultResponseDto>, AppError> {
    let roll_number: u64 = roll
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| AppError::InvalidRollNumber {
            roll_number: roll.clone(),
            detail: e.to_string(),
        })?;

    let use_proxy = ResultQueryDto::parse(query.as_deref()).use_proxy();
    if use_proxy {
        info!("Using proxy for roll {} as requested by client", roll_number);
    }

    // Run on its own task so a panic inside the fetch chain still gets answered
    let mut task = AbortOnDrop(tokio::spawn(async move {
        fetcher.fetch(roll_number, use_proxy).await
    }));

    match (&mut task.0).await {
        Ok(outcome) => Ok(Json(outcome.into())),
        Err(e) => {
            error!("Endpoint error for roll {}: {}", roll_number, e);
            Err(AppError::Internal {
                roll_number,
                detail: e.to_string(),
            })
        }
    }
}

/// 请求被取消（客户端断开）时一并中止抓取任务
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}
