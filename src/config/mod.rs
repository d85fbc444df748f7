// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括分层加载的原始配置和链接检查核心使用的不可变配置
pub mod checker;
pub mod settings;
