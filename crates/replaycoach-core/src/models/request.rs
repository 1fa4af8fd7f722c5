//! 코칭 모델 요청 모델.
//!
//! OpenAI 호환 chat-completions 요청 본문과 동일한 형태로 직렬화된다.

use serde::{Deserialize, Serialize};

/// 대화 메시지 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// 코칭 모델 요청 (`{model, messages, temperature, max_tokens}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// 모델 식별자
    pub model: String,
    /// 단일 user 메시지
    pub messages: Vec<ChatMessage>,
    /// 샘플링 온도
    pub temperature: f64,
    /// 최대 응답 토큰 수
    pub max_tokens: u32,
}

impl ModelRequest {
    /// 렌더링된 프롬프트 하나를 user 메시지로 담은 요청 생성
    pub fn single_user(
        model: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f64,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
            temperature,
            max_tokens,
        }
    }

    /// 첫 번째 메시지의 프롬프트 본문
    pub fn prompt(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}
