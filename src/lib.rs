// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 服务端与客户端共享的数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 抓取请求、抓取结果与成绩记录等核心数据结构
pub mod domain;

/// 引擎模块
///
/// HTTP 抓取引擎与带重试、代理回退的成绩抓取执行器
pub mod engines;

/// 基础设施模块
///
/// 指标导出等外部集成
pub mod infrastructure;

/// 批量编排模块
///
/// 客户端侧的分批并发抓取、去重累积与进度跟踪
pub mod orchestrator;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供重试策略、遥测初始化等通用功能
pub mod utils;
