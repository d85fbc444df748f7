// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod broken_link_repository_test;
pub mod exclusion_rule_repository_test;
pub mod link_target_cache_repository_test;
