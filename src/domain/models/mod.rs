//! # Domain Models Module
//!
//! 영속되지 않는 도메인 값 객체들입니다.
//!
//! - `auth`  : 요청 단위로 복원되는 현재 사용자
//! - `oauth` : 외부 프로바이더 프로필

pub mod auth;
pub mod oauth;

pub use auth::*;
pub use oauth::*;
