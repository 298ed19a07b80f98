//! # 인증 관련 설정 모듈
//!
//! 세션 쿠키와 외부 OAuth 2.0 프로바이더(Google, Facebook) 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! ```
//!
//! `GOOGLE_CLIENT_ID`가 없으면 `CLIENT_ID` / `CLIENT_SECRET` 을 대신 읽습니다.
//!
//! ### Facebook OAuth 설정
//! ```bash
//! export FACEBOOK_APP_ID="your-facebook-app-id"
//! export FACEBOOK_APP_SECRET="your-facebook-app-secret"
//! ```
//!
//! ### 콜백 및 세션 설정
//! ```bash
//! export CALLBACK_BASE_URL="http://localhost:3000"
//! export SESSION_COOKIE_NAME="secrets.sid"
//! export SESSION_MAX_AGE_SECONDS="604800"   # 생략 시 브라우저 세션 쿠키
//! export OAUTH_STATE_TTL_SECONDS="600"
//! ```
//!
//! 클라이언트 ID와 시크릿이 모두 있어야 해당 프로바이더가 활성화됩니다.

use serde::{Deserialize, Serialize};

/// Google OAuth 2.0 기본 엔드포인트
pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URI: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Facebook Graph API 기본 엔드포인트
pub const FACEBOOK_AUTH_URI: &str = "https://www.facebook.com/v18.0/dialog/oauth";
pub const FACEBOOK_TOKEN_URI: &str = "https://graph.facebook.com/v18.0/oauth/access_token";
pub const FACEBOOK_USERINFO_URI: &str = "https://graph.facebook.com/me?fields=id";

/// 외부 인증 프로바이더
///
/// 로컬 계정은 프로바이더가 아니라 사용자 레코드의 `username`/`password_hash`로 표현되므로
/// 이 열거형에는 OAuth 프로바이더만 존재합니다.
///
/// ## URL 경로와의 관계
///
/// `/auth/{provider}` 와 `/auth/{provider}/secrets` 의 `{provider}` 세그먼트가
/// [`AuthProvider::from_str`] 로 해석됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Google OAuth 2.0 인증
    Google,
    /// Facebook 로그인 (Graph API)
    Facebook,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// use crate::config::AuthProvider;
    ///
    /// assert_eq!(AuthProvider::from_str("Google")?, AuthProvider::Google);
    /// assert!(AuthProvider::from_str("twitter").is_err());
    /// ```
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "facebook" => Ok(AuthProvider::Facebook),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    /// AuthProvider를 소문자 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Facebook => "facebook",
        }
    }

    /// 사용자 문서에서 이 프로바이더의 ID가 저장되는 필드명
    pub fn user_field(&self) -> &'static str {
        match self {
            AuthProvider::Google => "googleId",
            AuthProvider::Facebook => "facebookId",
        }
    }

    /// 프로바이더 콜백 경로 (`/auth/{provider}/secrets`)
    pub fn callback_path(&self) -> String {
        format!("/auth/{}/secrets", self.as_str())
    }
}

/// 단일 OAuth 프로바이더의 클라이언트 등록 정보와 엔드포인트
#[derive(Debug, Clone)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    /// 사용자 동의 화면 URL
    pub auth_uri: String,
    /// Authorization Code → Access Token 교환 URL
    pub token_uri: String,
    /// 프로필 조회 URL
    pub userinfo_uri: String,
    /// 요청할 스코프 목록
    pub scopes: Vec<String>,
}

/// OAuth 전체 설정
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    /// 콜백 URL의 기준 주소 (예: `http://localhost:3000`)
    pub callback_base_url: String,
    /// 대기 중인 `state` 값의 유효 시간(초)
    pub state_ttl_seconds: u64,
    pub google: Option<OAuthProviderConfig>,
    pub facebook: Option<OAuthProviderConfig>,
}

impl OAuthSettings {
    /// 프로바이더 설정을 반환합니다. 설정되지 않았으면 `None`.
    pub fn provider(&self, provider: AuthProvider) -> Option<&OAuthProviderConfig> {
        match provider {
            AuthProvider::Google => self.google.as_ref(),
            AuthProvider::Facebook => self.facebook.as_ref(),
        }
    }

    /// 프로바이더에 등록할 redirect URI
    ///
    /// ```rust,ignore
    /// // CALLBACK_BASE_URL=http://localhost:3000
    /// assert_eq!(
    ///     settings.redirect_uri(AuthProvider::Google),
    ///     "http://localhost:3000/auth/google/secrets"
    /// );
    /// ```
    pub fn redirect_uri(&self, provider: AuthProvider) -> String {
        format!(
            "{}{}",
            self.callback_base_url.trim_end_matches('/'),
            provider.callback_path()
        )
    }
}

/// 세션 쿠키 설정
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// `Secure` 속성 여부
    pub cookie_secure: bool,
    /// 설정되면 쿠키 `Max-Age` 와 세션 저장소 TTL 로 함께 사용됩니다.
    pub max_age_seconds: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> OAuthSettings {
        OAuthSettings {
            callback_base_url: "http://localhost:3000/".to_string(),
            state_ttl_seconds: 600,
            google: Some(OAuthProviderConfig {
                client_id: "gid".to_string(),
                client_secret: "gsecret".to_string(),
                auth_uri: GOOGLE_AUTH_URI.to_string(),
                token_uri: GOOGLE_TOKEN_URI.to_string(),
                userinfo_uri: GOOGLE_USERINFO_URI.to_string(),
                scopes: vec!["profile".to_string()],
            }),
            facebook: None,
        }
    }

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("google").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("facebook").unwrap(), AuthProvider::Facebook);

        // 대소문자 무관 테스트
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);

        // 지원하지 않는 프로바이더 테스트
        assert!(AuthProvider::from_str("local").is_err());
        assert!(AuthProvider::from_str("github").is_err());
    }

    #[test]
    fn test_auth_provider_fields() {
        assert_eq!(AuthProvider::Google.as_str(), "google");
        assert_eq!(AuthProvider::Google.user_field(), "googleId");
        assert_eq!(AuthProvider::Facebook.user_field(), "facebookId");
        assert_eq!(AuthProvider::Facebook.callback_path(), "/auth/facebook/secrets");
    }

    #[test]
    fn test_redirect_uri_trims_trailing_slash() {
        assert_eq!(
            settings().redirect_uri(AuthProvider::Google),
            "http://localhost:3000/auth/google/secrets"
        );
    }

    #[test]
    fn test_provider_lookup() {
        let settings = settings();
        assert!(settings.provider(AuthProvider::Google).is_some());
        assert!(settings.provider(AuthProvider::Facebook).is_none());
    }
}
