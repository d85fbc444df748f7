// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含链接检查的核心实体、服务和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库连接、实体和仓库实现
pub mod infrastructure;

/// 链接类型模块
///
/// 各种链接类型的检查器及其注册表
pub mod linktypes;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 按域名分区的检查调度
pub mod workers;
