//! 애플리케이션 설정 구조체.
//!
//! 감시 폴더, 코칭 모델 엔드포인트, 프로필 문서 위치, OCR, 사용자 결정,
//! 코치 톤 등 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드하고
//! CLI 인자로 일부를 오버라이드한다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CoreError;
use crate::models::ingest::FileKind;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 감시/이동 폴더 설정
    #[serde(default)]
    pub watch: WatchConfig,
    /// 코칭 모델 설정
    #[serde(default)]
    pub model: ModelConfig,
    /// 프로필 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// OCR 설정
    #[serde(default)]
    pub ocr: OcrConfig,
    /// 사용자 결정 설정
    #[serde(default)]
    pub user: UserConfig,
    /// 코치 피드백 설정
    #[serde(default)]
    pub coach: CoachConfig,
}

// ============================================================
// 감시 설정
// ============================================================

/// 감시 폴더 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// 새 클립/스크린샷이 떨어지는 폴더 (비재귀 감시)
    #[serde(default = "default_watch_dir")]
    pub watch_dir: PathBuf,
    /// 처리 완료 파일, 피드백 JSON, 프로필 문서가 놓이는 폴더
    #[serde(default = "default_destination_dir")]
    pub destination_dir: PathBuf,
    /// 생성 이벤트 후 처리 전 대기 시간 (밀리초)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// 클립으로 분류할 확장자 (점 없이, 소문자)
    #[serde(default = "default_clip_extensions")]
    pub clip_extensions: Vec<String>,
    /// 스코어보드 이미지로 분류할 확장자 (점 없이, 소문자)
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            watch_dir: default_watch_dir(),
            destination_dir: default_destination_dir(),
            settle_delay_ms: default_settle_delay_ms(),
            clip_extensions: default_clip_extensions(),
            image_extensions: default_image_extensions(),
        }
    }
}

impl WatchConfig {
    /// 확장자로 파일 종류 분류 (대소문자 무시). 대상이 아니면 None
    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        let ext = path.extension()?.to_str()?;
        if self.clip_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
            Some(FileKind::Clip)
        } else if self.image_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
            Some(FileKind::Image)
        } else {
            None
        }
    }

    /// 정착 대기 시간
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

// ============================================================
// 코칭 모델 설정
// ============================================================

/// 코칭 모델 (OpenAI 호환 chat-completions) 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 요청 URL
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,
    /// 모델 이름
    #[serde(default = "default_model_name")]
    pub model: String,
    /// API 키 (비어 있으면 Authorization 헤더 생략)
    #[serde(default)]
    pub api_key: Option<String>,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
    /// 샘플링 온도
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// 클립 분석 최대 토큰
    #[serde(default = "default_clip_max_tokens")]
    pub clip_max_tokens: u32,
    /// 스코어보드 분석 최대 토큰
    #[serde(default = "default_scoreboard_max_tokens")]
    pub scoreboard_max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            model: default_model_name(),
            api_key: None,
            timeout_secs: default_model_timeout_secs(),
            temperature: default_temperature(),
            clip_max_tokens: default_clip_max_tokens(),
            scoreboard_max_tokens: default_scoreboard_max_tokens(),
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================
// 저장소 설정
// ============================================================

/// 이동 대상에 같은 이름의 파일이 있을 때의 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// 기존 파일 덮어쓰기
    Overwrite,
    /// `name-1.ext`, `name-2.ext` … 로 이름 변경
    #[default]
    RenameWithSuffix,
    /// 이동 거부 (원본은 감시 폴더에 남음)
    Reject,
}

/// 프로필/결과물 저장 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 프로필 문서 파일 이름 (destination_dir 기준)
    #[serde(default = "default_profile_file_name")]
    pub profile_file_name: String,
    /// 이동 충돌 정책
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profile_file_name: default_profile_file_name(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

// ============================================================
// OCR / 사용자 / 코치 설정
// ============================================================

/// OCR 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract 데이터 경로 (None이면 시스템 기본값)
    #[serde(default)]
    pub tessdata_path: Option<PathBuf>,
    /// 인식 언어
    #[serde(default = "default_ocr_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tessdata_path: None,
            language: default_ocr_language(),
        }
    }
}

/// 사용자 결정 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// 모든 파일을 기록할 기본 사용자 ID
    #[serde(default = "default_user_id")]
    pub default_user_id: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
        }
    }
}

/// 코치 피드백 톤
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachTone {
    #[default]
    Friendly,
    ToughLove,
}

/// 코치 피드백 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoachConfig {
    #[serde(default)]
    pub tone: CoachTone,
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 프로필 문서 전체 경로
    pub fn profile_path(&self) -> PathBuf {
        self.watch
            .destination_dir
            .join(&self.storage.profile_file_name)
    }

    /// 값 범위/일관성 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.model.endpoint.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "model.endpoint".to_string(),
                message: "엔드포인트가 비어 있음".to_string(),
            });
        }
        if self.model.timeout_secs == 0 {
            return Err(CoreError::Validation {
                field: "model.timeout_secs".to_string(),
                message: "0보다 커야 함".to_string(),
            });
        }
        if self.storage.profile_file_name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "storage.profile_file_name".to_string(),
                message: "파일 이름이 비어 있음".to_string(),
            });
        }
        if self.user.default_user_id.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "user.default_user_id".to_string(),
                message: "사용자 ID가 비어 있음".to_string(),
            });
        }
        if let Some(ext) = self
            .watch
            .clip_extensions
            .iter()
            .find(|c| self.watch.image_extensions.iter().any(|i| i.eq_ignore_ascii_case(c)))
        {
            return Err(CoreError::Validation {
                field: "watch.clip_extensions".to_string(),
                message: format!("이미지 확장자와 중복: {ext}"),
            });
        }
        Ok(())
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_watch_dir() -> PathBuf {
    PathBuf::from("incoming")
}
fn default_destination_dir() -> PathBuf {
    PathBuf::from("processed")
}
fn default_settle_delay_ms() -> u64 {
    2_000
}
fn default_clip_extensions() -> Vec<String> {
    vec!["mp4".to_string(), "wav".to_string()]
}
fn default_image_extensions() -> Vec<String> {
    vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()]
}
fn default_model_endpoint() -> String {
    "http://localhost:5000/v1/chat/completions".to_string()
}
fn default_model_name() -> String {
    "gpt-4-all".to_string()
}
fn default_model_timeout_secs() -> u64 {
    90
}
fn default_temperature() -> f64 {
    0.8
}
fn default_clip_max_tokens() -> u32 {
    800
}
fn default_scoreboard_max_tokens() -> u32 {
    600
}
fn default_profile_file_name() -> String {
    "user_profiles.json".to_string()
}
fn default_ocr_language() -> String {
    "eng".to_string()
}
fn default_user_id() -> String {
    "default_user".to_string()
}
