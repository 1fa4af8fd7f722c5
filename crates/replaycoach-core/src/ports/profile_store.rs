//! 프로필 저장소 포트.
//!
//! 구현: `replaycoach-storage` crate (`JsonProfileStore`)
//!
//! 모든 쓰기는 문서 전체에 대한 load → modify → store 사이클이다.
//! 구현체는 이 사이클을 직렬화하여 동시 갱신이 유실되지 않도록 보장해야 한다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::history::HistoryEntry;
use crate::models::profile::{ProfileDocument, UserProfile};

/// 프로필 변경 클로저 (`update`에 전달)
pub type ProfileMutation = Box<dyn FnOnce(&mut UserProfile) + Send>;

/// 사용자 프로필 저장소
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// 문서 전체 로드 (없으면 빈 문서를 생성/저장 후 반환)
    async fn load_all(&self) -> Result<ProfileDocument, CoreError>;

    /// 문서 전체 덮어쓰기
    async fn save_all(&self, profiles: &ProfileDocument) -> Result<(), CoreError>;

    /// 프로필 하나 로드 (없으면 기본 프로필 생성/저장)
    async fn load_one(&self, user_id: &str) -> Result<UserProfile, CoreError>;

    /// 프로필 하나 교체
    async fn save_one(&self, user_id: &str, profile: &UserProfile) -> Result<(), CoreError>;

    /// 이력 끝에 항목 추가
    async fn append_history(&self, user_id: &str, entry: HistoryEntry) -> Result<(), CoreError>;

    /// 원자적 read-modify-write: 변경 후 저장된 프로필 반환
    async fn update(
        &self,
        user_id: &str,
        mutation: ProfileMutation,
    ) -> Result<UserProfile, CoreError>;
}
