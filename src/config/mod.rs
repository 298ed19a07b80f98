//! 애플리케이션 설정 모듈
//!
//! 환경 변수로부터 [`AppConfig`]를 한 번 구성하여 시작 시점에 서비스들에 주입합니다.
//! 전역 상태로 보관하지 않으며, 테스트에서는 [`AppConfig::from_lookup`]에
//! 임의의 키 조회 함수를 넘겨 프로세스 환경을 건드리지 않고 설정을 만듭니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use secrets_service::config::AppConfig;
//!
//! let config = AppConfig::from_env();
//! println!("bind: {}", config.server.bind_address());
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use std::env;
use std::str::FromStr;
use log::{error, warn};

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub password: PasswordConfig,
    pub session: SessionConfig,
    pub oauth: OAuthSettings,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정을 구성합니다.
    ///
    /// 빈 문자열 값은 설정되지 않은 것으로 취급합니다.
    ///
    /// # Arguments
    ///
    /// * `lookup` - 환경 변수 이름을 받아 값을 돌려주는 함수
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// use std::collections::HashMap;
    ///
    /// let vars = HashMap::from([("PORT", "8080"), ("ENVIRONMENT", "test")]);
    /// let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
    /// assert_eq!(config.server.port, 8080);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("ENVIRONMENT")
            .or_else(|| get("NODE_ENV"))
            .map(|v| Environment::from_str(&v))
            .unwrap_or(Environment::Production);

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("PORT", get("PORT"), 3000),
            workers: parse_or("WORKERS", get("WORKERS"), 4),
        };

        let database = DatabaseConfig {
            uri: get("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            name: get("DATABASE_NAME").unwrap_or_else(|| "userDB".to_string()),
            users_collection: get("USERS_COLLECTION").unwrap_or_else(|| "users".to_string()),
        };

        let redis = RedisConfig {
            url: get("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string()),
        };

        let password = PasswordConfig::resolve(get("BCRYPT_COST").as_deref(), &environment);

        let callback_base_url = get("CALLBACK_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let session = SessionConfig {
            cookie_name: get("SESSION_COOKIE_NAME").unwrap_or_else(|| "secrets.sid".to_string()),
            cookie_secure: get("SESSION_COOKIE_SECURE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or_else(|| callback_base_url.starts_with("https://")),
            max_age_seconds: get("SESSION_MAX_AGE_SECONDS")
                .and_then(|v| parse_optional("SESSION_MAX_AGE_SECONDS", &v, MAX_SESSION_AGE_SECONDS)),
        };

        let google = provider_credentials(
            get("GOOGLE_CLIENT_ID").or_else(|| get("CLIENT_ID")),
            get("GOOGLE_CLIENT_SECRET").or_else(|| get("CLIENT_SECRET")),
        )
        .map(|(client_id, client_secret)| OAuthProviderConfig {
            client_id,
            client_secret,
            auth_uri: get("GOOGLE_AUTH_URI").unwrap_or_else(|| GOOGLE_AUTH_URI.to_string()),
            token_uri: get("GOOGLE_TOKEN_URI").unwrap_or_else(|| GOOGLE_TOKEN_URI.to_string()),
            userinfo_uri: get("GOOGLE_USERINFO_URI")
                .unwrap_or_else(|| GOOGLE_USERINFO_URI.to_string()),
            scopes: vec!["profile".to_string()],
        });

        let facebook = provider_credentials(get("FACEBOOK_APP_ID"), get("FACEBOOK_APP_SECRET"))
            .map(|(client_id, client_secret)| OAuthProviderConfig {
                client_id,
                client_secret,
                auth_uri: get("FACEBOOK_AUTH_URI").unwrap_or_else(|| FACEBOOK_AUTH_URI.to_string()),
                token_uri: get("FACEBOOK_TOKEN_URI")
                    .unwrap_or_else(|| FACEBOOK_TOKEN_URI.to_string()),
                userinfo_uri: get("FACEBOOK_USERINFO_URI")
                    .unwrap_or_else(|| FACEBOOK_USERINFO_URI.to_string()),
                scopes: Vec::new(),
            });

        let oauth = OAuthSettings {
            callback_base_url,
            state_ttl_seconds: parse_or("OAUTH_STATE_TTL_SECONDS", get("OAUTH_STATE_TTL_SECONDS"), 600),
            google,
            facebook,
        };

        Self {
            environment,
            server,
            database,
            redis,
            password,
            session,
            oauth,
        }
    }
}

/// 숫자 설정값을 파싱하고, 실패하면 에러 로그 후 기본값을 사용합니다.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse::<T>().unwrap_or_else(|_| {
            error!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, value, default);
            default
        }),
        None => default,
    }
}

/// 세션 최대 수명 상한 (10년)
pub const MAX_SESSION_AGE_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// 양수 초 단위 값을 파싱합니다. `max`를 넘으면 `max`로 잘라냅니다.
fn parse_optional(key: &str, raw: &str, max: u64) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            error!("{} 값이 올바르지 않습니다: '{}'. 무시합니다", key, raw);
            None
        }
        Ok(value) if value > max => {
            warn!("{} 값 {} 이(가) 상한을 넘습니다. {} 로 제한합니다", key, value, max);
            Some(max)
        }
        Ok(value) => Some(value),
    }
}

fn provider_credentials(id: Option<String>, secret: Option<String>) -> Option<(String, String)> {
    match (id, secret) {
        (Some(id), Some(secret)) => Some((id, secret)),
        _ => None,
    }
}
