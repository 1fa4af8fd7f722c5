//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 각 어댑터 crate가 이 trait들을 구현하며,
//! `replaycoach-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! I/O가 있는 trait은 `async_trait` 매크로로 object safety를 보장한다.

pub mod analytics;
pub mod coaching_model;
pub mod ocr_provider;
pub mod profile_store;
pub mod user_resolver;
