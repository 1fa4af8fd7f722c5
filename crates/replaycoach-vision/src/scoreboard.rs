//! 스코어보드 리더.
//!
//! 파일 읽기 → OCR → 스탯 추출을 하나로 묶는다. 어느 단계에서 실패하든
//! 에러를 전파하지 않고 `ScoreboardScan::Failed`로 돌려준다.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use replaycoach_core::models::stats::ScoreboardScan;
use replaycoach_core::ports::ocr_provider::OcrProvider;

use crate::stats;

/// 스코어보드 이미지 리더
#[derive(Clone)]
pub struct ScoreboardReader {
    ocr: Arc<dyn OcrProvider>,
}

impl ScoreboardReader {
    pub fn new(ocr: Arc<dyn OcrProvider>) -> Self {
        Self { ocr }
    }

    /// 이미지 한 장 스캔
    pub async fn scan(&self, path: &Path) -> ScoreboardScan {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), "스코어보드 파일 읽기 실패: {e}");
                return ScoreboardScan::Failed {
                    reason: format!("파일 읽기 실패: {e}"),
                };
            }
        };

        match self.ocr.extract_text(&bytes).await {
            Ok(text) => {
                debug!(
                    path = %path.display(),
                    provider = self.ocr.provider_name(),
                    chars = text.len(),
                    "스코어보드 OCR 완료"
                );
                ScoreboardScan::Extracted(stats::extract(&text))
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    provider = self.ocr.provider_name(),
                    "스코어보드 OCR 실패: {e}"
                );
                ScoreboardScan::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use replaycoach_core::error::CoreError;
    use replaycoach_core::models::stats::{StatKind, StatValue};
    use tempfile::TempDir;

    struct FixedTextOcr(&'static str);

    #[async_trait]
    impl OcrProvider for FixedTextOcr {
        async fn extract_text(&self, _image: &[u8]) -> Result<String, CoreError> {
            Ok(self.0.to_string())
        }

        fn provider_name(&self) -> &str {
            "fixed"
        }
    }

    struct BrokenOcr;

    #[async_trait]
    impl OcrProvider for BrokenOcr {
        async fn extract_text(&self, _image: &[u8]) -> Result<String, CoreError> {
            Err(CoreError::Ocr("엔진 없음".to_string()))
        }

        fn provider_name(&self) -> &str {
            "broken"
        }
    }

    #[tokio::test]
    async fn scan_extracts_stats_from_ocr_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("score1.png");
        std::fs::write(&path, b"png").unwrap();

        let reader = ScoreboardReader::new(Arc::new(FixedTextOcr("Kills: 12 Deaths: 3")));
        let scan = reader.scan(&path).await;

        let stats = scan.stats().expect("extracted");
        assert_eq!(stats.get(StatKind::Kills), Some(&StatValue::Value("12".into())));
        assert_eq!(stats.get(StatKind::Deaths), Some(&StatValue::Value("3".into())));
        assert_eq!(stats.get(StatKind::Assists), Some(&StatValue::NotAvailable));
    }

    #[tokio::test]
    async fn ocr_failure_is_a_failed_scan() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("score1.png");
        std::fs::write(&path, b"png").unwrap();

        let reader = ScoreboardReader::new(Arc::new(BrokenOcr));
        let scan = reader.scan(&path).await;
        assert!(matches!(scan, ScoreboardScan::Failed { ref reason } if reason.contains("엔진 없음")));
    }

    #[tokio::test]
    async fn missing_file_is_a_failed_scan() {
        let dir = TempDir::new().unwrap();
        let reader = ScoreboardReader::new(Arc::new(FixedTextOcr("Kills: 1")));
        let scan = reader.scan(&dir.path().join("gone.png")).await;
        assert!(scan.stats().is_none());
    }
}
