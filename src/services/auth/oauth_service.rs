//! # OAuth 2.0 핸드셰이크 서비스
//!
//! Google 과 Facebook 의 Authorization Code Flow 를 하나의 구현으로 처리합니다.
//! 두 프로바이더는 엔드포인트, 스코프, 프로필 필드명만 다르므로
//! [`OAuthProviderConfig`]로 차이를 표현합니다.
//!
//! ## 흐름
//!
//! ```text
//! 브라우저                         우리 서버                              프로바이더
//!    │ GET /auth/{provider}           │                                        │
//!    ├───────────────────────────────►│ state 생성 → oauth_state:{state} 저장   │
//!    │ 302 → 동의 화면                 │                                        │
//!    │◄───────────────────────────────┤                                        │
//!    │ 사용자 동의 ───────────────────────────────────────────────────────────►│
//!    │ GET /auth/{provider}/secrets?code&state ◄───────────────────────────────┤
//!    ├───────────────────────────────►│ state 일회성 소비 (take)                │
//!    │                                │ POST token_uri (code 교환) ────────────►│
//!    │                                │ GET userinfo_uri (Bearer) ─────────────►│
//!    │                                │ → ProviderProfile                      │
//! ```
//!
//! ## 실패 처리
//!
//! 사용자의 동의 거부, 누락된 파라미터, 알 수 없거나 만료된 `state`, 다른 프로바이더용 `state`,
//! 토큰 교환 실패, 프로필 조회 실패는 모두 `ProviderFailure`가 되어 로그인 화면으로 돌아갑니다.
//! `state` 저장소 장애만은 `StoreUnavailable`로 구분됩니다.

use std::sync::Arc;
use std::time::Duration;
use log::{info, warn};
use uuid::Uuid;
use crate::config::{AuthProvider, OAuthProviderConfig, OAuthSettings};
use crate::domain::dto::{OAuthCallbackQuery, OAuthTokenResponse};
use crate::domain::models::{ProviderProfile, ProviderUserInfo};
use crate::errors::{AppError, AppResult};
use crate::repositories::sessions::SessionStore;

/// 외부 API 호출 제한 시간
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct OAuthService {
    settings: OAuthSettings,
    states: Arc<dyn SessionStore>,
    http: reqwest::Client,
}

impl OAuthService {
    pub fn new(settings: OAuthSettings, states: Arc<dyn SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("HTTP 클라이언트 설정 실패, 기본 클라이언트 사용: {}", e);
                reqwest::Client::new()
            });

        Self { settings, states, http }
    }

    /// 설정된(클라이언트 ID와 시크릿이 모두 있는) 프로바이더 목록
    pub fn enabled_providers(&self) -> Vec<AuthProvider> {
        [AuthProvider::Google, AuthProvider::Facebook]
            .into_iter()
            .filter(|provider| self.settings.provider(*provider).is_some())
            .collect()
    }

    fn provider_config(&self, provider: AuthProvider) -> AppResult<&OAuthProviderConfig> {
        self.settings.provider(provider).ok_or_else(|| {
            AppError::ProviderFailure(format!("{} 로그인이 설정되지 않았습니다", provider.as_str()))
        })
    }

    fn state_key(state: &str) -> String {
        format!("oauth_state:{}", state)
    }

    /// 동의 화면 URL을 만들고, 콜백에서 검증할 `state`를 저장합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 브라우저를 리다이렉트할 URL
    /// * `Err(ProviderFailure)` - 프로바이더 미설정
    /// * `Err(StoreUnavailable)` - `state` 저장 실패
    pub async fn authorization_url(&self, provider: AuthProvider) -> AppResult<String> {
        let config = self.provider_config(provider)?;
        let state = Uuid::new_v4().simple().to_string();

        self.states
            .save(
                &Self::state_key(&state),
                provider.as_str(),
                Some(self.settings.state_ttl_seconds.max(1)),
            )
            .await?;

        let redirect_uri = self.settings.redirect_uri(provider);
        let mut params = vec![
            ("client_id", config.client_id.clone()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code".to_string()),
            ("state", state),
        ];
        if !config.scopes.is_empty() {
            params.push(("scope", config.scopes.join(" ")));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if config.auth_uri.contains('?') { '&' } else { '?' };
        Ok(format!("{}{}{}", config.auth_uri, separator, query_string))
    }

    /// 콜백 파라미터를 검증하고 프로바이더 프로필을 가져옵니다.
    pub async fn complete(
        &self,
        provider: AuthProvider,
        callback: &OAuthCallbackQuery,
    ) -> AppResult<ProviderProfile> {
        if let Some(error) = &callback.error {
            let description = callback.error_description.as_deref().unwrap_or("");
            return Err(AppError::ProviderFailure(format!(
                "{} 인증 거부: {} {}",
                provider.as_str(),
                error,
                description
            )));
        }

        let config = self.provider_config(provider)?;

        let (Some(code), Some(state)) = (
            callback.code.as_deref().filter(|c| !c.is_empty()),
            callback.state.as_deref().filter(|s| !s.is_empty()),
        ) else {
            return Err(AppError::ProviderFailure("code 또는 state 누락".to_string()));
        };

        match self.states.take(&Self::state_key(state)).await? {
            Some(stored) if stored == provider.as_str() => {}
            Some(_) => {
                return Err(AppError::ProviderFailure("다른 프로바이더의 state 입니다".to_string()));
            }
            None => {
                return Err(AppError::ProviderFailure("알 수 없거나 만료된 state 입니다".to_string()));
            }
        }

        let token = self.exchange_code_for_token(provider, config, code).await?;
        let info = self.get_user_info(provider, config, &token.access_token).await?;

        info!("{} 프로필 확인 완료", provider.as_str());
        Ok(ProviderProfile::from_user_info(provider, info))
    }

    async fn exchange_code_for_token(
        &self,
        provider: AuthProvider,
        config: &OAuthProviderConfig,
        auth_code: &str,
    ) -> AppResult<OAuthTokenResponse> {
        let redirect_uri = self.settings.redirect_uri(provider);
        let params = [
            ("code", auth_code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http
            .post(&config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ProviderFailure(format!("{} 토큰 요청 실패: {}", provider.as_str(), e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderFailure(format!(
                "{} 토큰 교환 실패 ({}): {}",
                provider.as_str(),
                status,
                error_text
            )));
        }

        response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::ProviderFailure(format!("{} 토큰 응답 파싱 실패: {}", provider.as_str(), e)))
    }

    async fn get_user_info(
        &self,
        provider: AuthProvider,
        config: &OAuthProviderConfig,
        access_token: &str,
    ) -> AppResult<ProviderUserInfo> {
        let response = self.http
            .get(&config.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ProviderFailure(format!("{} 사용자 정보 요청 실패: {}", provider.as_str(), e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ProviderFailure(format!(
                "{} 사용자 정보 조회 실패 ({})",
                provider.as_str(),
                status
            )));
        }

        let info = response
            .json::<ProviderUserInfo>()
            .await
            .map_err(|e| AppError::ProviderFailure(format!("{} 사용자 정보 파싱 실패: {}", provider.as_str(), e)))?;

        if info.id.is_empty() {
            return Err(AppError::ProviderFailure(format!("{} 프로필 ID가 비어 있습니다", provider.as_str())));
        }

        Ok(info)
    }
}
