//! 수집 대상 파일 분류.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 감시 폴더에 도착한 파일의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// 게임플레이 녹화 (영상/음성)
    Clip,
    /// 경기 종료 스코어보드 스크린샷
    Image,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clip => write!(f, "clip"),
            Self::Image => write!(f, "image"),
        }
    }
}
