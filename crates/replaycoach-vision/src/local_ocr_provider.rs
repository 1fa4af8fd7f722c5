//! 로컬 OCR 제공자: Tesseract 래퍼.
//!
//! 이미지 바이트를 먼저 `image` crate로 디코딩하므로, 손상된 파일은
//! `ocr` feature 여부와 관계없이 에러가 된다.

use std::path::PathBuf;

use async_trait::async_trait;

use replaycoach_core::config::OcrConfig;
use replaycoach_core::error::CoreError;
use replaycoach_core::ports::ocr_provider::OcrProvider;

// ============================================================
// LocalOcrProvider: Tesseract 래퍼
// ============================================================

/// 로컬 OCR 제공자 (Tesseract 기반)
pub struct LocalOcrProvider {
    #[cfg_attr(not(feature = "ocr"), allow(dead_code))]
    tessdata_path: Option<PathBuf>,
    #[cfg_attr(not(feature = "ocr"), allow(dead_code))]
    language: String,
}

impl LocalOcrProvider {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            tessdata_path: config.tessdata_path.clone(),
            language: config.language.clone(),
        }
    }
}

impl Default for LocalOcrProvider {
    fn default() -> Self {
        Self::new(&OcrConfig::default())
    }
}

#[async_trait]
impl OcrProvider for LocalOcrProvider {
    async fn extract_text(&self, image: &[u8]) -> Result<String, CoreError> {
        let img = image::load_from_memory(image)
            .map_err(|e| CoreError::Ocr(format!("이미지 디코딩 실패: {e}")))?;

        #[cfg(feature = "ocr")]
        {
            use crate::ocr::OcrExtractor;

            let extractor = OcrExtractor::new(self.tessdata_path.clone(), self.language.clone());
            Ok(extractor.extract_async(&img).await?)
        }

        #[cfg(not(feature = "ocr"))]
        {
            let _ = img;
            Err(CoreError::Ocr("OCR feature disabled".to_string()))
        }
    }

    fn provider_name(&self) -> &str {
        "local-tesseract"
    }
}
