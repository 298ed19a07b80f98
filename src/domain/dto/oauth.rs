//! OAuth 관련 DTO
use serde::Deserialize;

/// 프로바이더 콜백 쿼리 파라미터
///
/// 사용자가 동의를 거부하면 `code` 대신 `error`가 전달되므로 모든 필드가 선택적입니다.
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// 토큰 엔드포인트 응답
///
/// userinfo 조회에는 `access_token`만 쓰이며 나머지 필드는 무시합니다.
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
}
