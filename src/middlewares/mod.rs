//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 세션 미들웨어 (SessionMiddleware)
//! - 세션 쿠키에서 토큰 추출 및 사용자 복원
//! - 복원된 사용자를 request extension 에 저장 ([`CurrentUser`](crate::domain::CurrentUser))
//! - 미인증 요청은 `/login` 으로 리다이렉트
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::SessionMiddleware;
//!
//! cfg.service(
//!     web::resource("/secrets")
//!         .wrap(SessionMiddleware::new())
//!         .route(web::get().to(handlers::secrets::list_secrets))
//! );
//! ```

pub mod session_middleware;
mod session_inner;

// 미들웨어 재export
pub use session_middleware::SessionMiddleware;
