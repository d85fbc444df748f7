// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了链接检查的核心业务实体，包括：
/// - 检查结果（link_target_response）：一次检查的标准结果
/// - 结果编解码（response_codec）：持久化格式及旧格式升级
/// - 排除规则（exclusion_rule）：管理员维护的免检规则
/// - 缓存条目（cache_entry）：目标与最近一次结果的对应关系
/// - 统计（check_statistics）：一次检查运行的计数
/// - 链接目标（link_target）与失效链接记录（broken_link）
/// - 运行报告（report）
pub mod broken_link;
pub mod cache_entry;
pub mod check_statistics;
pub mod exclusion_rule;
pub mod link_target;
pub mod link_target_response;
pub mod report;
pub mod response_codec;
