//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용해 모든 실패를 HTTP 응답으로 변환합니다.
//!
//! ## 응답 정책
//!
//! 인증 실패, 중복 가입, OAuth 실패, 미인증 접근은 사용자에게 보여지는 "예상된 결과"이므로
//! 에러 화면 대신 해당 진입점으로 **302 리다이렉트** 됩니다.
//! 저장소 장애처럼 예상하지 못한 실패는 내부 정보를 숨긴 일반 에러 페이지로 응답합니다.
//!
//! | 변형 | 응답 |
//! |------|------|
//! | `AuthFailure` | 302 → `/login` |
//! | `Registration(DuplicateIdentifier)` | 302 → `/register` |
//! | `ProviderFailure` | 302 → `/login` |
//! | `Unauthenticated` | 302 → `/login` |
//! | `ValidationError` | 400 에러 페이지 |
//! | `ConflictError` | 409 에러 페이지 |
//! | `StoreUnavailable` / `InternalError` | 500 에러 페이지 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, AppResult};
//!
//! async fn load(repo: &dyn UserStore, id: &ObjectId) -> AppResult<User> {
//!     repo.find_by_id(id).await?.ok_or(AppError::Unauthenticated)
//! }
//! ```

use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use thiserror::Error;
use crate::views;

/// 회원가입 실패 사유
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationFailure {
    /// 이미 사용 중인 사용자명
    #[error("identifier is already registered")]
    DuplicateIdentifier,
}

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 로컬 로그인 실패 (사용자 없음과 비밀번호 불일치를 구분하지 않음)
    #[error("Authentication failed")]
    AuthFailure,

    /// 회원가입 실패
    #[error("Registration failed: {0}")]
    Registration(#[from] RegistrationFailure),

    /// OAuth 핸드셰이크 거부 또는 오류
    #[error("Provider failure: {0}")]
    ProviderFailure(String),

    /// 유효한 세션이 없음
    #[error("Unauthenticated")]
    Unauthenticated,

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 저장소 유니크 제약 위반 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// MongoDB / Redis 장애 (500 Internal Server Error)
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 리다이렉트로 해소되는 에러이면 이동할 경로를 반환합니다.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            AppError::AuthFailure | AppError::ProviderFailure(_) | AppError::Unauthenticated => {
                Some("/login")
            }
            AppError::Registration(_) => Some("/register"),
            _ => None,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthFailure
            | AppError::Registration(_)
            | AppError::ProviderFailure(_)
            | AppError::Unauthenticated => StatusCode::FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 리다이렉트 대상이 있으면 `Location` 헤더만 담은 302 응답을,
    /// 그 외에는 상세 내용을 숨긴 HTML 에러 페이지를 돌려줍니다.
    fn error_response(&self) -> HttpResponse {
        if let Some(location) = self.redirect_target() {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish();
        }

        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(views::error_page(status))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 내부 에러로 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 컨텍스트 정보와 함께 저장소 장애로 변환합니다.
    fn store_context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn store_context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::StoreUnavailable(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    fn location(error: &AppError) -> Option<String> {
        error
            .error_response()
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    }

    #[test]
    fn test_auth_failure_redirects_to_login() {
        let error = AppError::AuthFailure;

        assert_eq!(error.error_response().status(), StatusCode::FOUND);
        assert_eq!(location(&error).as_deref(), Some("/login"));
    }

    #[test]
    fn test_duplicate_registration_redirects_to_register() {
        let error: AppError = RegistrationFailure::DuplicateIdentifier.into();

        assert_eq!(location(&error).as_deref(), Some("/register"));
    }

    #[test]
    fn test_provider_failure_and_unauthenticated_redirect() {
        assert_eq!(
            location(&AppError::ProviderFailure("denied".to_string())).as_deref(),
            Some("/login")
        );
        assert_eq!(location(&AppError::Unauthenticated).as_deref(), Some("/login"));
    }

    #[test]
    fn test_store_unavailable_renders_error_page() {
        let error = AppError::StoreUnavailable("connection refused".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("username is required".to_string());

        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");

        match result.store_context("Redis 조회 실패") {
            Err(AppError::StoreUnavailable(msg)) => {
                assert!(msg.contains("Redis 조회 실패"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected StoreUnavailable, got {:?}", other),
        }
    }
}
