//! 통합 테스트 공용 헬퍼
//!
//! 메모리 저장소 위에 전체 애플리케이션을 조립합니다.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use secrets_service::config::{AppConfig, AuthProvider};
use secrets_service::core::AppServices;
use secrets_service::domain::User;
use secrets_service::errors::{AppError, AppResult};
use secrets_service::repositories::sessions::{InMemorySessionStore, SessionStore};
use secrets_service::repositories::users::{InMemoryUserStore, UserStore};

pub const COOKIE_NAME: &str = "secrets.sid";

pub struct TestApp {
    pub services: AppServices,
    pub users: Arc<InMemoryUserStore>,
    pub sessions: Arc<InMemorySessionStore>,
}

/// 기본 테스트 설정 (`ENVIRONMENT=test`)에 추가 변수를 덮어씁니다.
pub fn test_config(overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("ENVIRONMENT".to_string(), "test".to_string()),
        ("CALLBACK_BASE_URL".to_string(), "http://localhost:3000".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

pub fn build(config: &AppConfig) -> TestApp {
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let services = AppServices::new(config, users.clone(), sessions.clone());

    TestApp { services, users, sessions }
}

/// 모든 호출이 연결 장애로 실패하는 저장소
pub struct UnavailableStore;

fn unavailable<T>() -> AppResult<T> {
    Err(AppError::StoreUnavailable("connection refused".to_string()))
}

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_by_id(&self, _id: &ObjectId) -> AppResult<Option<User>> {
        unavailable()
    }

    async fn find_by_username(&self, _username: &str) -> AppResult<Option<User>> {
        unavailable()
    }

    async fn find_by_provider_id(&self, _provider: AuthProvider, _provider_id: &str) -> AppResult<Option<User>> {
        unavailable()
    }

    async fn create(&self, _user: User) -> AppResult<User> {
        unavailable()
    }

    async fn update_secret(&self, _id: &ObjectId, _secret: &str) -> AppResult<bool> {
        unavailable()
    }

    async fn find_with_secrets(&self) -> AppResult<Vec<User>> {
        unavailable()
    }
}

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn save(&self, _key: &str, _value: &str, _ttl_seconds: Option<u64>) -> AppResult<()> {
        unavailable()
    }

    async fn load(&self, _key: &str) -> AppResult<Option<String>> {
        unavailable()
    }

    async fn remove(&self, _key: &str) -> AppResult<()> {
        unavailable()
    }

    async fn take(&self, _key: &str) -> AppResult<Option<String>> {
        unavailable()
    }
}

/// 사용자 저장소와 세션 저장소가 모두 내려간 애플리케이션 서비스
pub fn build_unavailable(config: &AppConfig) -> AppServices {
    let store = Arc::new(UnavailableStore);
    AppServices::new(config, store.clone(), store)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .map(|c| c.into_owned())
}

pub fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
