//! # replaycoach-vision
//!
//! 스코어보드 이미지 처리 크레이트.
//! 이미지 디코딩, Tesseract OCR (`ocr` feature), OCR 텍스트에서의 스탯 추출,
//! 그리고 이 둘을 묶어 명시적 결과 타입을 돌려주는 `ScoreboardReader`를 제공한다.

pub mod local_ocr_provider;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod scoreboard;
pub mod stats;
