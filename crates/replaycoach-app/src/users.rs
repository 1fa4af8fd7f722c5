//! 사용자 결정 전략.

use std::path::Path;

use replaycoach_core::ports::user_resolver::UserResolver;

/// 모든 파일을 하나의 사용자에게 귀속
#[derive(Debug, Clone)]
pub struct FixedUserResolver {
    user_id: String,
}

impl FixedUserResolver {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl UserResolver for FixedUserResolver {
    fn resolve(&self, _path: &Path) -> String {
        self.user_id.clone()
    }
}
