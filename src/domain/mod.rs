//! 도메인 계층
//!
//! ```text
//! domain
//! ├── entities/  ← 영속성 엔티티 (MongoDB 문서)
//! ├── models/    ← 값 객체 & 요청 추출자
//! └── dto/       ← 폼, 쿼리, 외부 API 응답
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::User;
pub use dto::{CredentialsForm, OAuthCallbackQuery, OAuthTokenResponse, SecretForm};
pub use models::{CurrentUser, ProviderProfile, ProviderUserInfo};
