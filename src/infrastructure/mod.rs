// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，提供对具体技术的抽象和封装。
///
/// 包含的子模块：
/// - 内容来源（content）：基于 JSON 清单的内容仓库
/// - 数据库（database）：提供数据库连接和实体映射
/// - 仓库实现（repositories）：提供领域仓库接口的具体实现
///
/// 基础设施层遵循依赖倒置原则，依赖于领域层的抽象接口。
pub mod content;
pub mod database;
pub mod repositories;
