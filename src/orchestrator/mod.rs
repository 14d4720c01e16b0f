// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 批量编排模块
///
/// 客户端侧的批量抓取：把准考证号区间切成固定大小的批次，
/// 批内并发请求成绩接口，批间顺序执行，结果按准考证号去重累积
pub mod accumulator;
pub mod api_client;
pub mod batch;
pub mod render;
pub mod runner;
