//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, MongoDB/Redis 접속 정보와 패스워드 해싱 설정을 관리합니다.
//! 모든 값은 시작 시점에 한 번 읽혀 [`AppConfig`](super::AppConfig)에 담깁니다.

use log::error;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// 허용되는 최소 bcrypt cost
    pub const MIN_COST: u32 = 4;
    /// 허용되는 최대 bcrypt cost
    pub const MAX_COST: u32 = 15;

    /// 설정값과 실행 환경으로부터 bcrypt cost를 결정합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위의 정수이면 그대로 사용하고,
    /// 그렇지 않으면 환경별 기본값으로 대체합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn resolve(raw_cost: Option<&str>, env: &Environment) -> Self {
        let fallback = Self::bcrypt_cost_for_env(env);

        let bcrypt_cost = match raw_cost.map(|s| s.trim().parse::<u32>()) {
            Some(Ok(cost)) if (Self::MIN_COST..=Self::MAX_COST).contains(&cost) => cost,
            Some(_) => {
                error!("BCRYPT_COST 값이 올바르지 않습니다. 기본값 {} 사용", fallback);
                fallback
            }
            None => fallback,
        };

        Self { bcrypt_cost }
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// actix 워커 스레드 수
    pub workers: usize,
}

impl ServerConfig {
    /// `host:port` 형태의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MongoDB 접속 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB 연결 URI
    pub uri: String,
    /// 데이터베이스 이름
    pub name: String,
    /// 사용자 레코드 컬렉션 이름
    pub users_collection: String,
}

/// Redis 접속 설정
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("testing"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        // 알 수 없는 값은 프로덕션으로 간주
        assert_eq!(Environment::from_str("qa"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_resolution() {
        let env = Environment::Production;

        assert_eq!(PasswordConfig::resolve(Some("8"), &env).bcrypt_cost, 8);
        assert_eq!(PasswordConfig::resolve(None, &env).bcrypt_cost, 12);
        // 범위 밖이거나 숫자가 아니면 환경 기본값
        assert_eq!(PasswordConfig::resolve(Some("3"), &env).bcrypt_cost, 12);
        assert_eq!(PasswordConfig::resolve(Some("99"), &env).bcrypt_cost, 12);
        assert_eq!(PasswordConfig::resolve(Some("abc"), &Environment::Test).bcrypt_cost, 4);
    }

    #[test]
    fn test_bind_address() {
        let server = ServerConfig { host: "0.0.0.0".to_string(), port: 3000, workers: 2 };
        assert_eq!(server.bind_address(), "0.0.0.0:3000");
    }
}
