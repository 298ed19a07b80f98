//! 데이터 전송 객체 (폼, 쿼리, 외부 API 응답)

pub mod users;
pub mod oauth;

pub use users::*;
pub use oauth::*;
