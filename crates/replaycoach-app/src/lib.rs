//! # replaycoach-app
//!
//! 클립/스코어보드 수집 파이프라인의 조립과 실행.
//!
//! - [`pipeline`]: 파일 하나를 처리하는 오케스트레이터
//! - [`watcher`]: 폴더 감시 + 경로별 정착 대기
//! - [`prompt`]: 파일 종류별 모델 요청 생성
//! - [`analytics`]: 기본(고정 문구) 경기 분석
//! - [`users`]: 사용자 결정 전략
//! - [`lifecycle`]: 종료 신호
//! - [`wiring`]: 설정 기반 의존성 조립

pub mod analytics;
pub mod lifecycle;
pub mod pipeline;
pub mod prompt;
pub mod users;
pub mod watcher;
pub mod wiring;
