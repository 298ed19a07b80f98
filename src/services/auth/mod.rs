//! 인증 서비스 모듈
//!
//! - [`SessionService`] : 세션 토큰 발급, 복원, 폐기
//! - [`OAuthService`]   : Google / Facebook OAuth 2.0 핸드셰이크
//!
//! # Examples
//!
//! ```rust,ignore
//! // OAuth 콜백 처리
//! let profile = oauth.complete(AuthProvider::Google, &query).await?;
//! let user = identity.find_or_create_by_provider(profile.provider, &profile.provider_id).await?;
//! let token = sessions.create_session(&user).await?;
//! ```

pub mod session_service;
pub mod oauth_service;

pub use session_service::{SessionService, SessionToken};
pub use oauth_service::OAuthService;
