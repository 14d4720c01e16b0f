// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::form_urlencoded;

/// 成绩查询参数
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultQueryDto {
    /// `proxy` 参数的全部取值
    pub proxy: Vec<String>,
}

impl ResultQueryDto {
    /// 从原始查询串解析，无法识别的参数直接忽略
    pub fn parse(query: Option<&str>) -> Self {
        let proxy = form_urlencoded::parse(query.unwrap_or_default().as_bytes())
            .filter(|(key, _)| key == "proxy")
            .map(|(_, value)| value.into_owned())
            .collect();
        Self { proxy }
    }

    /// 只有唯一且字面值为 "true" 的 `proxy` 才开启代理
    pub fn use_proxy(&self) -> bool {
        matches!(self.proxy.as_slice(), [value] if value == "true")
    }
}
