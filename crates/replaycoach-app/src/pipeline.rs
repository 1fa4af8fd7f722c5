//! 수집 파이프라인.
//!
//! 감시 폴더에 들어온 파일 하나를 끝까지 처리한다:
//! 사용자 결정 → 프로필 로드 → 프롬프트 생성 → 모델 호출 → 피드백 기록
//! → 이력 추가 + last_seen 갱신 → 목적지로 이동.
//!
//! 어떤 단계가 실패해도 호출자에게 에러를 전파하지 않고 `ProcessOutcome::Failed`를
//! 돌려준다. 이미 완료된 단계는 되돌리지 않는다.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use replaycoach_core::config::{AppConfig, CoachTone, CollisionPolicy};
use replaycoach_core::error::CoreError;
use replaycoach_core::models::history::{ClipEntry, HistoryEntry, ImageEntry};
use replaycoach_core::models::ingest::FileKind;
use replaycoach_core::models::profile::UserProfile;
use replaycoach_core::ports::analytics::{AnalysisContext, MatchAnalytics};
use replaycoach_core::ports::coaching_model::{is_failure_advice, CoachingModel};
use replaycoach_core::ports::profile_store::ProfileStore;
use replaycoach_core::ports::user_resolver::UserResolver;
use replaycoach_storage::feedback::FeedbackWriter;
use replaycoach_storage::relocation;

use crate::prompt::PromptBuilder;

/// 로그에 남길 조언 미리보기 길이 (문자)
const ADVICE_PREVIEW_CHARS: usize = 80;

/// 파일 하나의 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// 처리 후 목적지로 이동됨
    Relocated { destination: PathBuf },
    /// 처리는 끝났지만 원본이 이미 사라져 이동하지 않음
    Processed,
    /// 중간 단계 실패 (원본은 감시 폴더에 남음)
    Failed { reason: String },
}

/// 파이프라인 협력자 묶음
pub struct PipelineDeps {
    pub users: Arc<dyn UserResolver>,
    pub store: Arc<dyn ProfileStore>,
    pub prompts: PromptBuilder,
    pub model: Arc<dyn CoachingModel>,
    pub analytics: Arc<dyn MatchAnalytics>,
    pub feedback: FeedbackWriter,
}

/// 수집 파이프라인
pub struct IngestPipeline {
    watch_dir: PathBuf,
    destination_dir: PathBuf,
    collision_policy: CollisionPolicy,
    tone: CoachTone,
    deps: PipelineDeps,
}

impl IngestPipeline {
    pub fn new(config: &AppConfig, deps: PipelineDeps) -> Self {
        Self {
            watch_dir: config.watch.watch_dir.clone(),
            destination_dir: config.watch.destination_dir.clone(),
            collision_policy: config.storage.collision_policy,
            tone: config.coach.tone,
            deps,
        }
    }

    /// 파일 하나 처리
    pub async fn process(&self, path: &Path, kind: FileKind) -> ProcessOutcome {
        info!(path = %path.display(), kind = %kind, "파일 처리 시작");

        match self.run(path, kind).await {
            Ok(outcome) => {
                match &outcome {
                    ProcessOutcome::Relocated { destination } => {
                        info!(path = %path.display(), to = %destination.display(), "처리 완료")
                    }
                    ProcessOutcome::Processed => {
                        warn!(path = %path.display(), "처리 완료, 원본이 없어 이동 생략")
                    }
                    ProcessOutcome::Failed { .. } => {}
                }
                outcome
            }
            Err(e) => {
                error!(path = %path.display(), kind = %kind, "파일 처리 실패: {e}");
                ProcessOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn run(&self, path: &Path, kind: FileKind) -> Result<ProcessOutcome, CoreError> {
        let user_id = self.deps.users.resolve(path);
        let profile = self.deps.store.load_one(&user_id).await?;

        let (request, scan) = match kind {
            FileKind::Clip => (self.deps.prompts.build_clip_prompt(path, &profile), None),
            FileKind::Image => {
                let built = self.deps.prompts.build_scoreboard_prompt(path, &profile).await;
                (built.request, Some(built.scan))
            }
        };

        let advice = self.deps.model.send(&request).await;
        if is_failure_advice(&advice) {
            warn!(path = %path.display(), provider = self.deps.model.provider_name(), "모델 실패 응답 기록: {}", preview(&advice));
        } else {
            info!(path = %path.display(), "코칭 응답: {}", preview(&advice));
        }

        self.deps.feedback.write(path, &advice).await?;

        let recorded_path = self.recorded_path(path);
        let timestamp = Utc::now();
        let entry = match scan {
            None => {
                let ctx = AnalysisContext {
                    user_id: &user_id,
                    source_path: path,
                    advice: &advice,
                    profile: &profile,
                };
                let analysis = self.deps.analytics.analyze_clip(&ctx, self.tone);
                HistoryEntry::Clip(ClipEntry {
                    clip_path: recorded_path,
                    timestamp,
                    ai_feedback: advice,
                    analysis,
                })
            }
            Some(scan) => HistoryEntry::Image(ImageEntry {
                image_path: recorded_path,
                timestamp,
                ai_feedback: advice,
                stats: scan.into_stats_or_empty(),
            }),
        };

        self.deps
            .store
            .update(&user_id, Box::new(move |p: &mut UserProfile| p.record(entry)))
            .await?;

        if !tokio::fs::try_exists(path).await? {
            return Ok(ProcessOutcome::Processed);
        }

        let destination =
            relocation::relocate(path, &self.destination_dir, self.collision_policy).await?;
        Ok(ProcessOutcome::Relocated { destination })
    }

    /// 이력에 남길 경로 (감시 폴더 기준 상대 경로, 밖이면 그대로)
    fn recorded_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.watch_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

fn preview(advice: &str) -> String {
    let mut out: String = advice.chars().take(ADVICE_PREVIEW_CHARS).collect();
    if advice.chars().count() > ADVICE_PREVIEW_CHARS {
        out.push_str("...");
    }
    out.replace('\n', " ")
}
