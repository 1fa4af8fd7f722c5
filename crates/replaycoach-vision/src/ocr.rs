//! OCR 텍스트 추출 모듈.
//!
//! `leptess` 기반 Tesseract OCR 래퍼.
//! `ocr` feature flag 활성화 시에만 빌드된다.
//! Tesseract 호출은 블로킹이므로 `spawn_blocking`에서 실행한다.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use replaycoach_core::error::CoreError;

/// OCR 에러 타입
#[derive(Debug, Error)]
pub enum OcrError {
    /// Tesseract 초기화 실패 (언어 데이터 누락 등)
    #[error("OCR 초기화 실패: {0}")]
    Init(String),

    /// 이미지 설정 실패
    #[error("OCR 이미지 설정 실패: {0}")]
    ImageSetup(String),

    /// 텍스트 추출 실패
    #[error("OCR 텍스트 추출 실패: {0}")]
    Extraction(String),

    /// 빈 이미지 입력
    #[error("빈 이미지: 너비 또는 높이가 0")]
    EmptyImage,

    /// 비동기 작업 실패
    #[error("OCR 비동기 작업 실패: {0}")]
    Async(String),
}

impl From<OcrError> for CoreError {
    fn from(err: OcrError) -> Self {
        CoreError::Ocr(err.to_string())
    }
}

/// Tesseract 텍스트 추출기
#[derive(Debug, Clone)]
pub struct OcrExtractor {
    /// Tesseract 데이터 경로 (None이면 시스템 기본값)
    tessdata_path: Option<PathBuf>,
    /// 인식 언어 (예: "eng")
    language: String,
}

impl OcrExtractor {
    pub fn new(tessdata_path: Option<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            tessdata_path,
            language: language.into(),
        }
    }

    /// 이미지에서 텍스트 추출 (비동기)
    pub async fn extract_async(&self, image: &image::DynamicImage) -> Result<String, OcrError> {
        let rgba = image.to_rgba8();
        let (w, h) = (rgba.width(), rgba.height());

        if w == 0 || h == 0 {
            return Err(OcrError::EmptyImage);
        }

        let tessdata = self
            .tessdata_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        let language = self.language.clone();
        let raw_data = rgba.into_raw();

        let text = tokio::task::spawn_blocking(move || {
            let mut lt = leptess::LepTess::new(tessdata.as_deref(), &language)
                .map_err(|e| OcrError::Init(format!("{e}")))?;

            lt.set_image_from_mem(&raw_data, w as i32, h as i32, 4, (w * 4) as i32)
                .map_err(|_| OcrError::ImageSetup("이미지 메모리 설정 실패".to_string()))?;

            lt.get_utf8_text()
                .map_err(|e| OcrError::Extraction(format!("{e}")))
        })
        .await
        .map_err(|e| OcrError::Async(format!("작업 조인 실패: {e}")))??;

        debug!(chars = text.len(), "OCR 텍스트 추출 완료 ({}x{})", w, h);
        Ok(text.trim().to_string())
    }

    /// tessdata 경로 반환
    pub fn tessdata_path(&self) -> Option<&PathBuf> {
        self.tessdata_path.as_ref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}
