//! 코칭 모델 포트.
//!
//! 원격 언어 모델에 프롬프트를 보내고 조언 텍스트를 받는다.
//! 실패는 에러로 전파하지 않고 태그가 붙은 문자열로 돌려준다.

use async_trait::async_trait;

use crate::models::request::ModelRequest;

/// HTTP 에러 응답 태그 접두사 (`[Model Error {status}] {body}`)
pub const MODEL_ERROR_TAG: &str = "[Model Error";

/// 전송/파싱 예외 태그 접두사 (`[Model Exception] {detail}`)
pub const MODEL_EXCEPTION_TAG: &str = "[Model Exception]";

/// 코칭 모델: 요청 1회당 HTTP 호출 1회, 재시도 없음
///
/// 구현체: `RemoteCoachClient` (OpenAI 호환 chat-completions)
#[async_trait]
pub trait CoachingModel: Send + Sync {
    /// 요청 전송 후 조언 텍스트 반환
    ///
    /// 성공 시 첫 번째 choice의 본문(trim), 실패 시 태그가 붙은 에러 문자열.
    async fn send(&self, request: &ModelRequest) -> String;

    /// 제공자 이름 (로그용)
    fn provider_name(&self) -> &str;
}

/// 조언 문자열이 모델 실패를 나타내는지 여부
pub fn is_failure_advice(advice: &str) -> bool {
    advice.starts_with(MODEL_ERROR_TAG) || advice.starts_with(MODEL_EXCEPTION_TAG)
}
