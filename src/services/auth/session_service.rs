//! # Session Manager
//!
//! 인증된 사용자를 불투명한 세션 토큰으로 바꾸고, 이후 요청에서 토큰을 다시 사용자로
//! 복원합니다. 쿠키에는 토큰만 담기며 비밀번호 해시나 프로바이더 ID는 절대 담기지 않습니다.
//!
//! ## 토큰과 저장 형식
//!
//! ```text
//! token  = base64url(32 random bytes)             → 쿠키 값 (43자)
//! key    = "session:" + hex(sha256(token))        → 저장소 키
//! value  = user ObjectId (hex)                    → 저장소 값
//! ```
//!
//! 저장소에는 토큰의 해시만 남으므로 저장소가 노출되어도 쿠키를 재구성할 수 없습니다.
//!
//! ## 요청 단위 상태 전이
//!
//! ```text
//! Unauthenticated ──create_session / resolve_session 성공──► Authenticated
//! Authenticated   ──destroy_session──────────────────────► Unauthenticated
//! ```

use std::sync::Arc;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::{debug, info};
use mongodb::bson::oid::ObjectId;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::config::SessionConfig;
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::sessions::SessionStore;
use crate::repositories::users::UserStore;

/// 세션 토큰 원본 바이트 길이
const TOKEN_BYTES: usize = 32;
/// base64url(32 bytes) 길이
const TOKEN_LENGTH: usize = 43;

/// 쿠키에 담기는 불투명 세션 토큰
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// 256비트 난수 토큰을 생성합니다.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
        bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// 쿠키 값을 토큰으로 해석합니다. 형식이 맞지 않으면 `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != TOKEN_LENGTH {
            return None;
        }
        match URL_SAFE_NO_PAD.decode(raw) {
            Ok(bytes) if bytes.len() == TOKEN_BYTES => Some(Self(raw.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 저장소 키 (`session:{sha256 hex}`)
    pub fn storage_key(&self) -> String {
        format!("session:{:x}", Sha256::digest(self.0.as_bytes()))
    }
}

/// 로그에 토큰 원문이 찍히지 않도록 가립니다.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
    config: SessionConfig,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionStore>, users: Arc<dyn UserStore>, config: SessionConfig) -> Self {
        Self { sessions, users, config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// 인증 직후 호출되어 사용자 ID에 묶인 새 토큰을 발급합니다.
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let user = identity.authenticate_local(&form.username, &form.password).await?;
    /// let token = sessions.create_session(&user).await?;
    /// let cookie = sessions.session_cookie(&token);
    /// ```
    pub async fn create_session(&self, user: &User) -> AppResult<SessionToken> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자에게 세션을 발급할 수 없습니다".to_string()))?;

        let token = SessionToken::generate();
        self.sessions
            .save(&token.storage_key(), &user_id, self.config.max_age_seconds)
            .await?;

        info!("세션 생성: 사용자 {}", user_id);
        Ok(token)
    }

    /// 쿠키 값에서 현재 사용자를 복원합니다.
    ///
    /// 매 요청마다 저장소에서 사용자를 다시 읽으므로 직전 요청에서 바뀐 `secret`도 보입니다.
    ///
    /// # Errors
    ///
    /// * `Unauthenticated` - 토큰 없음, 형식 오류, 폐기된 토큰, 사라진 사용자
    /// * `StoreUnavailable` - 저장소 장애
    pub async fn resolve_session(&self, raw_token: Option<&str>) -> AppResult<User> {
        let token = raw_token
            .and_then(SessionToken::parse)
            .ok_or(AppError::Unauthenticated)?;

        let key = token.storage_key();
        let user_id = self
            .sessions
            .load(&key)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        let Ok(object_id) = ObjectId::parse_str(&user_id) else {
            debug!("세션에 저장된 사용자 ID 형식 오류");
            return Err(AppError::Unauthenticated);
        };

        match self.users.find_by_id(&object_id).await? {
            Some(user) => Ok(user),
            None => {
                debug!("세션의 사용자 레코드가 존재하지 않습니다: {}", user_id);
                Err(AppError::Unauthenticated)
            }
        }
    }

    /// 토큰을 폐기합니다. 없는 세션을 폐기해도 에러가 아닙니다.
    pub async fn destroy_session(&self, raw_token: Option<&str>) -> AppResult<()> {
        if let Some(token) = raw_token.and_then(SessionToken::parse) {
            self.sessions.remove(&token.storage_key()).await?;
            info!("세션 폐기");
        }
        Ok(())
    }

    /// 토큰을 담은 세션 쿠키
    pub fn session_cookie(&self, token: &SessionToken) -> Cookie<'static> {
        let mut builder = Cookie::build(self.config.cookie_name.clone(), token.as_str().to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure);

        if let Some(max_age) = self.config.max_age_seconds {
            builder = builder.max_age(CookieDuration::seconds(i64::try_from(max_age).unwrap_or(i64::MAX)));
        }

        builder.finish()
    }

    /// 브라우저의 세션 쿠키를 지우는 만료 쿠키
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.config.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .finish();
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::repositories::sessions::InMemorySessionStore;
    use crate::repositories::users::InMemoryUserStore;

    fn config() -> SessionConfig {
        SessionConfig {
            cookie_name: "secrets.sid".to_string(),
            cookie_secure: false,
            max_age_seconds: None,
        }
    }

    async fn setup() -> (SessionService, Arc<InMemoryUserStore>, Arc<InMemorySessionStore>, User) {
        let users = Arc::new(InMemoryUserStore::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let user = users
            .create(User::new_oauth(AuthProvider::Google, "g-1".to_string()))
            .await
            .unwrap();
        let service = SessionService::new(sessions.clone(), users.clone(), config());
        (service, users, sessions, user)
    }

    #[test]
    fn test_token_format() {
        let token = SessionToken::generate();

        assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        assert!(SessionToken::parse(token.as_str()).is_some());
        assert_ne!(token, SessionToken::generate());
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("short").is_none());
        assert!(SessionToken::parse(&"!".repeat(TOKEN_LENGTH)).is_none());
    }

    #[test]
    fn test_storage_key_hides_token() {
        let token = SessionToken::generate();
        let key = token.storage_key();

        assert!(key.starts_with("session:"));
        assert_eq!(key.len(), "session:".len() + 64);
        assert!(!key.contains(token.as_str()));
    }

    #[actix_web::test]
    async fn test_create_then_resolve() {
        let (service, _, sessions, user) = setup().await;

        let token = service.create_session(&user).await.unwrap();
        let resolved = service.resolve_session(Some(token.as_str())).await.unwrap();

        assert_eq!(resolved.id, user.id);
        assert_eq!(sessions.live_keys(), 1);
    }

    #[actix_web::test]
    async fn test_resolve_reloads_current_record() {
        let (service, users, _, user) = setup().await;
        let token = service.create_session(&user).await.unwrap();

        users.update_secret(user.id.as_ref().unwrap(), "fresh").await.unwrap();

        let resolved = service.resolve_session(Some(token.as_str())).await.unwrap();
        assert_eq!(resolved.secret.as_deref(), Some("fresh"));
    }

    #[actix_web::test]
    async fn test_destroy_then_resolve_is_unauthenticated() {
        let (service, _, _, user) = setup().await;
        let token = service.create_session(&user).await.unwrap();

        service.destroy_session(Some(token.as_str())).await.unwrap();
        // 두 번 폐기해도 에러가 아님
        service.destroy_session(Some(token.as_str())).await.unwrap();
        service.destroy_session(None).await.unwrap();

        let result = service.resolve_session(Some(token.as_str())).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[actix_web::test]
    async fn test_absent_or_unknown_tokens() {
        let (service, _, _, _) = setup().await;

        assert!(matches!(service.resolve_session(None).await, Err(AppError::Unauthenticated)));
        assert!(matches!(
            service.resolve_session(Some("not-a-token")).await,
            Err(AppError::Unauthenticated)
        ));
        let unknown = SessionToken::generate();
        assert!(matches!(
            service.resolve_session(Some(unknown.as_str())).await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[actix_web::test]
    async fn test_session_bound_to_missing_user() {
        let (service, _, sessions, _) = setup().await;
        let token = SessionToken::generate();
        sessions
            .save(&token.storage_key(), &ObjectId::new().to_hex(), None)
            .await
            .unwrap();

        let result = service.resolve_session(Some(token.as_str())).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[actix_web::test]
    async fn test_cookie_attributes() {
        let (service, _, _, user) = setup().await;
        let token = service.create_session(&user).await.unwrap();

        let cookie = service.session_cookie(&token);
        assert_eq!(cookie.name(), "secrets.sid");
        assert_eq!(cookie.value(), token.as_str());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        // Max-Age 미설정 시 브라우저 세션 쿠키
        assert!(cookie.max_age().is_none());

        let removal = service.removal_cookie();
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(CookieDuration::ZERO));
    }

    #[actix_web::test]
    async fn test_max_age_applies_to_cookie_and_store() {
        let users = Arc::new(InMemoryUserStore::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let user = users
            .create(User::new_local("alice".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let service = SessionService::new(
            sessions.clone(),
            users,
            SessionConfig { max_age_seconds: Some(u64::MAX), ..config() },
        );

        let token = service.create_session(&user).await.unwrap();

        // 범위를 넘는 값도 음수로 뒤집히지 않음
        assert_eq!(service.session_cookie(&token).max_age(), Some(CookieDuration::seconds(i64::MAX)));
        assert_eq!(sessions.live_keys(), 1);
    }
}
