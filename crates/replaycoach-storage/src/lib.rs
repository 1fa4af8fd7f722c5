//! # replaycoach-storage
//!
//! 로컬 저장소 어댑터.
//! 사용자 프로필 JSON 문서, 파일별 피드백 산출물, 처리 완료 파일 이동을 담당한다.
//!
//! ## 모듈
//! - `profile_store`: 프로필 문서 저장소 (ProfileStore 구현)
//! - `feedback`: `{stem}_feedback.json` 작성
//! - `relocation`: 목적지 폴더로 이동 (충돌 정책 적용)

pub mod feedback;
pub mod profile_store;
pub mod relocation;
