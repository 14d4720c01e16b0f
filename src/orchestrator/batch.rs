// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::ops::Range;

/// 区间分批迭代器
///
/// 把 `ids` 切成连续的、大小为 `size` 的批次，最后一批可以更小
#[derive(Debug, Clone)]
pub struct Batches {
    next: u64,
    end: u64,
    size: u64,
}

impl Batches {
    /// `size` 必须大于0，由调用方保证
    pub fn new(ids: Range<u64>, size: usize) -> Self {
        Self {
            next: ids.start,
            end: ids.end,
            size: size.max(1) as u64,
        }
    }

    /// 批次总数
    pub fn count_total(&self) -> u64 {
        self.end.saturating_sub(self.next).div_ceil(self.size)
    }
}

impl Iterator for Batches {
    type Item = Range<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let batch_end = self.next.saturating_add(self.size).min(self.end);
        let batch = self.next..batch_end;
        self.next = batch_end;
        Some(batch)
    }
}

/// 计算进度百分比，最多 100
pub fn progress_percent(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (completed as f64 * 100.0 / total as f64).min(100.0)
}
