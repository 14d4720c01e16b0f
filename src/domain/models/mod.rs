// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心数据结构，包括：
/// - 抓取请求与结果（fetch）：单个准考证号的一次尝试及其终态
/// - 成绩记录（result_record）：客户端累积和渲染的记录
pub mod fetch;
pub mod result_record;
