//! 데이터 액세스 계층
//!
//! - `users`    : 사용자 레코드 (MongoDB / 메모리)
//! - `sessions` : 세션 토큰과 OAuth state (Redis / 메모리)

pub mod users;
pub mod sessions;
