// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::traits::{LinkTypeChecker, ERRNO_NOT_EXISTING};
use crate::domain::models::link_target::{LinkContext, LINK_TYPE_FILE};
use crate::domain::models::link_target_response::LinkTargetResponse;
use crate::domain::repositories::content_repository::ContentRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// 文件链接检查器
pub struct FileLinkChecker {
    content: Arc<dyn ContentRepository>,
}

impl FileLinkChecker {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }
}

#[async_trait]
impl LinkTypeChecker for FileLinkChecker {
    async fn check(&self, target: &str, _context: &LinkContext) -> LinkTargetResponse {
        let response = match self.content.find_file(target).await {
            Ok(Some(file)) if !file.missing => LinkTargetResponse::ok(),
            Ok(_) => LinkTargetResponse::broken(LINK_TYPE_FILE, ERRNO_NOT_EXISTING)
                .with_message(format!("File {} does not exist", target)),
            Err(err) => LinkTargetResponse::unknown(err.to_string()),
        };
        response.with_url_checker(self.name())
    }

    fn name(&self) -> &str {
        LINK_TYPE_FILE
    }
}
