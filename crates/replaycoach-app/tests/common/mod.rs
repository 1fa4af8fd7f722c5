//! 통합 테스트 공용 도우미: 가짜 OCR, 고정 응답 모델, 임시 폴더 설정.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;

use replaycoach_app::pipeline::IngestPipeline;
use replaycoach_app::wiring;
use replaycoach_core::config::AppConfig;
use replaycoach_core::error::CoreError;
use replaycoach_core::models::profile::ProfileDocument;
use replaycoach_core::models::request::ModelRequest;
use replaycoach_core::ports::coaching_model::CoachingModel;
use replaycoach_core::ports::ocr_provider::OcrProvider;

/// 고정 텍스트 또는 고정 에러를 돌려주는 OCR
pub struct FakeOcr {
    result: Result<String, String>,
}

impl FakeOcr {
    pub fn text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(text.to_string()),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(reason.to_string()),
        })
    }
}

#[async_trait]
impl OcrProvider for FakeOcr {
    async fn extract_text(&self, _image: &[u8]) -> Result<String, CoreError> {
        self.result.clone().map_err(CoreError::Ocr)
    }

    fn provider_name(&self) -> &str {
        "fake-ocr"
    }
}

/// 고정 응답 모델: 받은 요청을 기록한다
pub struct FixedAdviceModel {
    advice: String,
    pub requests: Mutex<Vec<ModelRequest>>,
}

impl FixedAdviceModel {
    pub fn new(advice: &str) -> Arc<Self> {
        Arc::new(Self {
            advice: advice.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().last().map(|r| r.prompt().to_string())
    }
}

#[async_trait]
impl CoachingModel for FixedAdviceModel {
    async fn send(&self, request: &ModelRequest) -> String {
        self.requests.lock().push(request.clone());
        self.advice.clone()
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }
}

/// 임시 감시/목적지 폴더
pub struct Workspace {
    pub _dir: TempDir,
    pub incoming: PathBuf,
    pub processed: PathBuf,
    pub config: AppConfig,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let incoming = dir.path().join("incoming");
        let processed = dir.path().join("processed");
        std::fs::create_dir_all(&incoming).unwrap();
        std::fs::create_dir_all(&processed).unwrap();

        let mut config = AppConfig::default_config();
        config.watch.watch_dir = incoming.clone();
        config.watch.destination_dir = processed.clone();
        config.watch.settle_delay_ms = 200;

        Self {
            _dir: dir,
            incoming,
            processed,
            config,
        }
    }

    pub fn drop_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.incoming.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn pipeline(
        &self,
        ocr: Arc<dyn OcrProvider>,
        model: Arc<dyn CoachingModel>,
    ) -> IngestPipeline {
        wiring::build_pipeline_with(&self.config, ocr, model)
    }

    pub fn profiles(&self) -> ProfileDocument {
        read_json(&self.config.profile_path())
    }

    pub fn feedback(&self, stem: &str) -> serde_json::Value {
        read_json(&self.processed.join(format!("{stem}_feedback.json")))
    }
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
