//! # replaycoach-network
//!
//! 원격 코칭 모델 어댑터.
//! `CoachingModel` 포트를 OpenAI 호환 chat-completions HTTP API로 구현한다.

pub mod coach_client;
