//! HTTP 핸들러 모듈
//!
//! 각 핸들러는 서비스 계층을 호출하고 HTML 을 렌더링하거나 리다이렉트합니다.
//! 예상된 실패(인증 실패, 중복 가입, OAuth 실패, 미인증)는 `AppError`의
//! `ResponseError` 구현에서 리다이렉트로 해소됩니다.

pub mod pages;
pub mod auth;
pub mod secrets;

use actix_web::http::header;
use actix_web::HttpResponse;

/// 302 리다이렉트 응답
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
