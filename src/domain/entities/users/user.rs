//! User Entity Implementation
//!
//! 시스템의 유일한 영속 엔티티입니다. 한 레코드는 로컬 자격 증명, Google ID, Facebook ID 중
//! 0개 이상을 가질 수 있으며, 서로 다른 방식으로 만들어진 계정은 병합하지 않습니다.
//!
//! ## MongoDB 문서 형태
//!
//! ```json
//! {
//!   "_id": ObjectId("..."),
//!   "username": "alice@example.com",
//!   "password_hash": "$2b$12$...",
//!   "googleId": "10987654321",
//!   "secret": "I still sleep with a night light",
//!   "created_at": ISODate("...")
//! }
//! ```
//!
//! 값이 없는 필드는 문서에 기록하지 않으므로 sparse 유니크 인덱스가 그대로 동작합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로컬 계정 식별자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// bcrypt 해시 (로컬 계정에만 존재)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(rename = "googleId", default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(rename = "facebookId", default, skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,
    /// 사용자가 제출한 비밀 (제출 전에는 없음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// 이 필드 없이 저장된 기존 문서는 읽는 시점의 시각으로 채웁니다.
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
}

impl User {
    /// 로컬 자격 증명으로 새 사용자를 만듭니다.
    pub fn new_local(username: String, password_hash: String) -> Self {
        Self {
            id: None,
            username: Some(username),
            password_hash: Some(password_hash),
            google_id: None,
            facebook_id: None,
            secret: None,
            created_at: DateTime::now(),
        }
    }

    /// 외부 프로바이더 ID만 가진 새 사용자를 만듭니다.
    pub fn new_oauth(provider: AuthProvider, provider_id: String) -> Self {
        let mut user = Self {
            id: None,
            username: None,
            password_hash: None,
            google_id: None,
            facebook_id: None,
            secret: None,
            created_at: DateTime::now(),
        };

        match provider {
            AuthProvider::Google => user.google_id = Some(provider_id),
            AuthProvider::Facebook => user.facebook_id = Some(provider_id),
        }

        user
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 해당 프로바이더에 연결된 ID
    pub fn provider_id(&self, provider: AuthProvider) -> Option<&str> {
        match provider {
            AuthProvider::Google => self.google_id.as_deref(),
            AuthProvider::Facebook => self.facebook_id.as_deref(),
        }
    }
}
