//! OCR 제공자 포트.
//!
//! 이미지 바이트 → 평문 텍스트. 엔진은 블랙박스로 취급한다.
//! 손상된 이미지나 엔진 오류는 `Err`로 돌려주며, 호출자는 복구 가능한 상황으로 다룬다.

use async_trait::async_trait;

use crate::error::CoreError;

/// OCR 제공자
///
/// 구현체: `LocalOcrProvider` (Tesseract)
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// 이미지 한 장에서 전체 텍스트 추출
    async fn extract_text(&self, image: &[u8]) -> Result<String, CoreError>;

    /// 제공자 이름 (예: "local-tesseract")
    fn provider_name(&self) -> &str;
}
