//! 프롬프트 빌더.
//!
//! 파일 종류별로 모델 요청을 만든다. 스코어보드는 OCR 스캔을 한 번만 수행하고,
//! 그 결과를 요청과 함께 돌려주어 이력 기록에 재사용한다.

use std::path::Path;

use tracing::debug;

use replaycoach_core::config::ModelConfig;
use replaycoach_core::models::profile::UserProfile;
use replaycoach_core::models::request::ModelRequest;
use replaycoach_core::models::stats::ScoreboardScan;
use replaycoach_core::prompt;
use replaycoach_vision::scoreboard::ScoreboardReader;

/// 스코어보드 프롬프트 + 스캔 결과
#[derive(Debug, Clone)]
pub struct ScoreboardPrompt {
    pub request: ModelRequest,
    pub scan: ScoreboardScan,
}

/// 모델 요청 생성기
#[derive(Clone)]
pub struct PromptBuilder {
    reader: ScoreboardReader,
    model: ModelConfig,
}

impl PromptBuilder {
    pub fn new(reader: ScoreboardReader, model: ModelConfig) -> Self {
        Self { reader, model }
    }

    /// 클립 분석 요청
    pub fn build_clip_prompt(&self, clip_path: &Path, profile: &UserProfile) -> ModelRequest {
        ModelRequest::single_user(
            &self.model.model,
            prompt::render_clip_prompt(clip_path, profile),
            self.model.temperature,
            self.model.clip_max_tokens,
        )
    }

    /// 스코어보드 분석 요청 (OCR 실패 시 축약 프롬프트)
    pub async fn build_scoreboard_prompt(
        &self,
        image_path: &Path,
        profile: &UserProfile,
    ) -> ScoreboardPrompt {
        let scan = self.reader.scan(image_path).await;
        let text = match &scan {
            ScoreboardScan::Extracted(stats) => prompt::render_scoreboard_prompt(stats, profile),
            ScoreboardScan::Failed { reason } => {
                debug!(path = %image_path.display(), reason = %reason, "축약 프롬프트 사용");
                prompt::render_degraded_scoreboard_prompt(profile)
            }
        };

        ScoreboardPrompt {
            request: ModelRequest::single_user(
                &self.model.model,
                text,
                self.model.temperature,
                self.model.scoreboard_max_tokens,
            ),
            scan,
        }
    }
}
