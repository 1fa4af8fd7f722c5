//! 의존성 조립.
//!
//! 설정으로부터 파이프라인 협력자를 만들어 `IngestPipeline`을 구성한다.

use std::sync::Arc;

use replaycoach_core::config::AppConfig;
use replaycoach_core::error::CoreError;
use replaycoach_core::ports::coaching_model::CoachingModel;
use replaycoach_core::ports::ocr_provider::OcrProvider;
use replaycoach_network::coach_client::RemoteCoachClient;
use replaycoach_storage::feedback::FeedbackWriter;
use replaycoach_storage::profile_store::JsonProfileStore;
use replaycoach_vision::local_ocr_provider::LocalOcrProvider;
use replaycoach_vision::scoreboard::ScoreboardReader;

use crate::analytics::StubAnalytics;
use crate::pipeline::{IngestPipeline, PipelineDeps};
use crate::prompt::PromptBuilder;
use crate::users::FixedUserResolver;

/// 로컬 OCR + 원격 코칭 모델로 파이프라인 구성
pub fn build_pipeline(config: &AppConfig) -> Result<IngestPipeline, CoreError> {
    let ocr: Arc<dyn OcrProvider> = Arc::new(LocalOcrProvider::new(&config.ocr));
    let model: Arc<dyn CoachingModel> = Arc::new(RemoteCoachClient::new(&config.model)?);
    Ok(build_pipeline_with(config, ocr, model))
}

/// OCR / 코칭 모델을 주입해 파이프라인 구성
pub fn build_pipeline_with(
    config: &AppConfig,
    ocr: Arc<dyn OcrProvider>,
    model: Arc<dyn CoachingModel>,
) -> IngestPipeline {
    let deps = PipelineDeps {
        users: Arc::new(FixedUserResolver::new(&config.user.default_user_id)),
        store: Arc::new(JsonProfileStore::new(config.profile_path())),
        prompts: PromptBuilder::new(ScoreboardReader::new(ocr), config.model.clone()),
        model,
        analytics: Arc::new(StubAnalytics),
        feedback: FeedbackWriter::new(&config.watch.destination_dir),
    };
    IngestPipeline::new(config, deps)
}
