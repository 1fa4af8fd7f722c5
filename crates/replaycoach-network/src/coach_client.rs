//! 원격 코칭 모델 클라이언트.
//!
//! OpenAI 호환 `POST /v1/chat/completions` 엔드포인트에 요청 본문 하나를 보낸다.
//! 재시도는 하지 않으며, 실패는 태그가 붙은 문자열로 변환되어 파이프라인이
//! 그대로 피드백으로 기록한다.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use replaycoach_core::config::ModelConfig;
use replaycoach_core::error::CoreError;
use replaycoach_core::models::request::ModelRequest;
use replaycoach_core::ports::coaching_model::{
    CoachingModel, MODEL_ERROR_TAG, MODEL_EXCEPTION_TAG,
};

// ============================================================
// 응답 스키마
// ============================================================

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

// ============================================================
// RemoteCoachClient
// ============================================================

/// 원격 코칭 모델 클라이언트
#[derive(Debug)]
pub struct RemoteCoachClient {
    /// HTTP 클라이언트 (타임아웃 포함)
    http_client: reqwest::Client,
    /// 요청 URL
    endpoint: String,
    /// API 키 (설정된 경우에만 Bearer 헤더 전송)
    api_key: Option<String>,
    /// 로그용 모델 이름
    model: String,
}

impl RemoteCoachClient {
    pub fn new(config: &ModelConfig) -> Result<Self, CoreError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            model = %config.model,
            timeout = config.timeout_secs,
            "RemoteCoachClient 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
        })
    }

    /// 응답 본문에서 첫 번째 choice의 content 추출
    fn parse_advice(body: &str) -> Result<String, CoreError> {
        let response: ChatCompletionResponse = serde_json::from_str(body)?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::Internal("응답에 choices가 비어 있음".to_string()))?;
        Ok(choice.message.content.trim().to_string())
    }

    async fn post(&self, request: &ModelRequest) -> Result<String, CoreError> {
        let mut builder = self.http_client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| {
                CoreError::Network(format!("코칭 모델 호출 실패: {}", describe_transport(&e)))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                CoreError::Network(format!("코칭 모델 응답 읽기 실패: {}", describe_transport(&e)))
            })?;

        if !status.is_success() {
            warn!(status = %status, "코칭 모델 오류 응답");
            return Ok(format!("{} {}] {}", MODEL_ERROR_TAG, status.as_u16(), body));
        }

        Self::parse_advice(&body)
    }
}

/// 전송 실패 종류(타임아웃/연결 실패)를 앞에 붙인 설명
fn describe_transport(e: &reqwest::Error) -> String {
    let kind = if e.is_timeout() {
        "타임아웃"
    } else if e.is_connect() {
        "연결 실패"
    } else {
        "전송 실패"
    };
    format!("{kind}: {e}")
}

#[async_trait]
impl CoachingModel for RemoteCoachClient {
    async fn send(&self, request: &ModelRequest) -> String {
        debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            max_tokens = request.max_tokens,
            "코칭 모델 요청"
        );

        match self.post(request).await {
            Ok(advice) => advice,
            Err(e) => {
                warn!(endpoint = %self.endpoint, "코칭 모델 요청 예외: {e}");
                format!("{} {}", MODEL_EXCEPTION_TAG, e)
            }
        }
    }

    fn provider_name(&self) -> &str {
        &self.model
    }
}

// ============================================================
// 테스트
// ============================================================
