// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 定义服务端与批量客户端之间共享的数据传输对象
pub mod dto;
