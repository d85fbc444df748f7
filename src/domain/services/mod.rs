// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含链接检查的核心业务逻辑服务。
///
/// 包含的服务：
/// - 排除规则匹配（exclusion_matcher）：判断目标是否免检
/// - 抓取间隔控制（crawl_delay）：保证同一域名的请求间隔
/// - 链接目标缓存（link_target_cache）：带过期判断的结果缓存
/// - 链接检查引擎（link_checker）：按目标执行完整的检查流程
pub mod crawl_delay;
pub mod exclusion_matcher;
pub mod link_checker;
pub mod link_target_cache;
