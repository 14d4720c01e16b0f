// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 HTTP 接口的请求与响应结构
/// 服务端序列化、批量客户端反序列化同一套结构
pub mod health_response;
pub mod result_query;
pub mod result_response;
