//! # 세션 저장소
//!
//! 세션 토큰 해시 → 사용자 ID, OAuth `state` → 프로바이더 이름처럼 짧은 문자열 매핑을
//! 보관하는 키-값 저장소 계약과 Redis 구현입니다.
//!
//! ## 키 규칙
//!
//! | 용도 | 키 | 값 |
//! |------|----|----|
//! | 세션 | `session:{sha256(token)}` | 사용자 ObjectId (hex) |
//! | OAuth state | `oauth_state:{state}` | 프로바이더 이름 |

use std::sync::Arc;
use async_trait::async_trait;
use log::debug;
use crate::caching::redis::RedisClient;
use crate::errors::{AppResult, ErrorContext};

/// 세션/상태 저장소 계약
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 값을 저장합니다. `ttl_seconds`가 없으면 만료되지 않습니다.
    async fn save(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()>;

    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// 키를 삭제합니다. 없는 키를 삭제해도 에러가 아닙니다.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// 값을 읽으면서 원자적으로 삭제합니다 (일회용 값).
    async fn take(&self, key: &str) -> AppResult<Option<String>>;
}

/// Redis 기반 세션 저장소
pub struct RedisSessionRepository {
    redis: Arc<RedisClient>,
}

impl RedisSessionRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl SessionStore for RedisSessionRepository {
    async fn save(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()> {
        self.redis
            .set_string(key, value, ttl_seconds)
            .await
            .store_context("Redis 저장 실패")
    }

    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        self.redis
            .get_string(key)
            .await
            .store_context("Redis 조회 실패")
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let removed = self.redis
            .del(key)
            .await
            .store_context("Redis 삭제 실패")?;

        if !removed {
            debug!("삭제할 키가 이미 없습니다");
        }
        Ok(())
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        self.redis
            .get_del(key)
            .await
            .store_context("Redis GETDEL 실패")
    }
}
