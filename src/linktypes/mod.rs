// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 链接类型模块
///
/// 每种链接类型由一个实现 [`traits::LinkTypeChecker`] 的检查器处理，
/// 检查器通过 [`registry::LinkTypeRegistry`] 按名称注册和查找
pub mod db;
pub mod external;
pub mod file;
pub mod page;
pub mod registry;
pub mod traits;
