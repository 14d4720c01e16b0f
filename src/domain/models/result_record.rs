// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 客户端可见的成绩记录
///
/// `html` 为上游原始页面，或本地生成的错误片段。每个准考证号只保留一条。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// 准考证号
    pub id: u64,
    /// 页面内容或错误片段
    pub html: String,
}

impl ResultRecord {
    pub fn new(id: u64, html: impl Into<String>) -> Self {
        Self {
            id,
            html: html.into(),
        }
    }
}
