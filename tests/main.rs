// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 测试主模块
///
/// 集成测试使用 SQLite 内存数据库，通过迁移器建表
mod integration;
