// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::result_response::ResultResponseDto;
use crate::domain::models::result_record::ResultRecord;
use html_escape::encode_text;

/// 成功但没有内容时的占位文本
pub const NO_DATA: &str = "No data returned";

/// 把成绩接口的响应转换为记录
///
/// 上游抓取错误渲染为错误片段，成功时原样保留HTML
pub fn record_from_response(id: u64, response: ResultResponseDto) -> ResultRecord {
    if let Some(error) = response.error {
        return ResultRecord::new(
            id,
            scrape_error_fragment(&error, response.error_detail.as_deref()),
        );
    }

    match response.result {
        Some(html) if !html.is_empty() => ResultRecord::new(id, html),
        _ => ResultRecord::new(id, NO_DATA),
    }
}

/// 成绩接口调用本身失败时的记录
pub fn transport_error_record(id: u64, message: &str) -> ResultRecord {
    ResultRecord::new(id, request_error_fragment(message))
}

/// 上游抓取错误片段
pub fn scrape_error_fragment(error: &str, detail: Option<&str>) -> String {
    let detail = detail
        .filter(|d| !d.is_empty())
        .map(|d| format!("<p class=\"text-sm mt-2\">{}</p>", encode_text(d)))
        .unwrap_or_default();

    format!(
        "<div class=\"bg-red-50 p-4 rounded-md text-red-700 mb-4\"><p class=\"font-bold\">Error:</p><p>{}</p>{}</div>",
        encode_text(error),
        detail
    )
}

/// 请求错误片段
pub fn request_error_fragment(message: &str) -> String {
    format!(
        "<div class=\"bg-red-50 p-4 rounded-md text-red-700\"><p class=\"font-bold\">Request Error:</p><p>{}</p></div>",
        encode_text(message)
    )
}
