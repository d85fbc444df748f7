// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 链接目标缓存仓库（link_target_cache_repository）：保存每个目标最近一次的检查结果
/// - 排除规则仓库（exclusion_rule_repository）：只读查询管理员维护的排除规则
/// - 失效链接仓库（broken_link_repository）：保存每次运行发现的失效链接
/// - 内容仓库（content_repository）：提供待检查的链接及页面、记录、文件元数据
pub mod broken_link_repository;
pub mod content_repository;
pub mod exclusion_rule_repository;
pub mod link_target_cache_repository;

pub use link_target_cache_repository::RepositoryError;
