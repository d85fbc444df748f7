// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括 robots.txt 检查、URL 预处理、重试策略、错误类型和遥测初始化
pub mod errors;
pub mod retry_policy;
pub mod robots;
pub mod telemetry;
pub mod url_utils;
