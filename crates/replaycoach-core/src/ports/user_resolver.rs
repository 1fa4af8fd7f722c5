//! 사용자 결정 포트.
//!
//! 도착한 파일이 어느 사용자 프로필에 기록될지 결정한다.
//! 현재 배포는 단일 사용자지만, 다중 사용자 지원은 구현체 교체만으로 가능하다.

use std::path::Path;

/// 파일 → 사용자 식별자
pub trait UserResolver: Send + Sync {
    fn resolve(&self, path: &Path) -> String;
}
