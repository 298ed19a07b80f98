//! 라우트 설정 모듈
//!
//! 페이지, 인증, 비밀 관련 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Routes
//!
//! | Method | Path | 인증 | 동작 |
//! |--------|------|------|------|
//! | GET | `/` | - | 랜딩 페이지 |
//! | GET/POST | `/login` | - | 로그인 폼 / 로컬 로그인 |
//! | GET/POST | `/register` | - | 회원가입 폼 / 로컬 회원가입 |
//! | GET | `/auth/{provider}` | - | OAuth 시작 (`google`, `facebook`) |
//! | GET | `/auth/{provider}/secrets` | - | OAuth 콜백 |
//! | GET | `/logout` | - | 세션 폐기 |
//! | GET | `/secrets` | 필요 | 비밀 목록 |
//! | GET/POST | `/submit` | 필요 | 비밀 제출 |
//! | GET | `/health` | - | 헬스체크 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_page_routes(cfg);
    configure_auth_routes(cfg);
    configure_secret_routes(cfg);
}

fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::pages::home)
        .service(handlers::pages::login_page)
        .service(handlers::pages::register_page);
}

/// 인증 관련 라우트를 설정합니다
///
/// 콜백 경로(`/auth/{provider}/secrets`)는 시작 경로보다 구체적이므로 먼저 등록합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::login)
        .service(handlers::auth::register)
        .service(handlers::auth::logout)
        .service(handlers::auth::oauth_callback)
        .service(handlers::auth::oauth_login);
}

/// 세션이 필요한 라우트 (각 핸들러에 `SessionMiddleware` 적용)
fn configure_secret_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::secrets::list_secrets)
        .service(handlers::secrets::submit_page)
        .service(handlers::secrets::submit_secret);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:3000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "secrets_service",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "secrets_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
