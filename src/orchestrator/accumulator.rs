// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::result_record::ResultRecord;
use std::collections::BTreeMap;

/// 结果累积器
///
/// 按准考证号去重，同一准考证号后写覆盖先写。每次运行开始时新建，不跨运行复用。
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    records: BTreeMap<u64, ResultRecord>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一批记录
    pub fn merge(&mut self, records: impl IntoIterator<Item = ResultRecord>) {
        for record in records {
            self.records.insert(record.id, record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&ResultRecord> {
        self.records.get(&id)
    }

    /// 按准考证号升序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.values()
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records.into_values().collect()
    }
}
