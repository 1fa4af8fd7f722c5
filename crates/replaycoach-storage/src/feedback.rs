//! 파일별 피드백 산출물.
//!
//! 처리한 파일마다 목적지 폴더에 `{stem}_feedback.json` (`{"feedback": ...}`)을 남긴다.
//! 같은 이름의 파일이 있으면 덮어쓴다.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::debug;

use replaycoach_core::error::CoreError;

#[derive(Serialize)]
struct FeedbackArtifact<'a> {
    feedback: &'a str,
}

/// 피드백 JSON 작성기
#[derive(Debug, Clone)]
pub struct FeedbackWriter {
    destination_dir: PathBuf,
}

impl FeedbackWriter {
    pub fn new(destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            destination_dir: destination_dir.into(),
        }
    }

    /// 원본 파일에 대응하는 피드백 파일 경로 (이동 시 붙는 접미사와 무관하게 원본 이름 기준)
    pub fn artifact_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.destination_dir.join(format!("{stem}_feedback.json"))
    }

    /// 피드백 기록 후 파일 경로 반환
    pub async fn write(&self, source: &Path, feedback: &str) -> Result<PathBuf, CoreError> {
        fs::create_dir_all(&self.destination_dir).await?;

        let path = self.artifact_path(source);
        let content = serde_json::to_string_pretty(&FeedbackArtifact { feedback })?;
        fs::write(&path, content).await?;

        debug!(path = %path.display(), "피드백 파일 저장");
        Ok(path)
    }
}
