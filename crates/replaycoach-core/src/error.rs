//! replaycoach 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러 타입에서 `CoreError`로 변환한다.

use std::path::PathBuf;

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 파일 I/O, 원격 모델 호출 등 파이프라인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "WatchDir", "SourceFile")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// OCR 처리 실패 (이미지 디코딩 포함)
    #[error("OCR 에러: {0}")]
    Ocr(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 프로필 문서 파싱 불가
    #[error("손상된 문서 {path}: {message}")]
    CorruptDocument {
        /// 문서 경로
        path: PathBuf,
        /// 파싱 실패 사유
        message: String,
    },

    /// 이동 대상 경로에 같은 이름의 파일이 이미 존재 (Reject 정책)
    #[error("이동 대상이 이미 존재함: {0}")]
    RelocationConflict(PathBuf),
}
