// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 内容来源模块
///
/// 提供基于 JSON 清单文件的内容仓库实现
pub mod manifest;
