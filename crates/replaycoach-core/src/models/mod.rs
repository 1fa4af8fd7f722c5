//! replaycoach 도메인 모델.
//!
//! 프로필 문서, 이력 항목, 스코어보드 스탯, 모델 요청 등
//! 파이프라인 전 구간에서 공유하는 데이터 구조체를 정의한다.
//! 영속화되는 모델은 모두 `serde` Serialize/Deserialize를 구현한다.

pub mod history;
pub mod ingest;
pub mod profile;
pub mod request;
pub mod stats;
mod timestamp;
