//! 키-값 저장소 계층 모듈
//!
//! 세션 토큰과 OAuth `state` 값을 Redis 에 보관합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let redis = RedisClient::connect("redis://localhost:6379").await?;
//! redis.set_string("session:abc", "64f0c...", None).await?;
//! let user_id = redis.get_string("session:abc").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
