//! 시크릿 공유 서비스 백엔드
//!
//! 방문자가 로컬 계정, Google, Facebook 으로 로그인한 뒤 익명의 "비밀" 한 줄을
//! 제출하고, 다른 사용자들이 남긴 비밀을 볼 수 있는 웹 애플리케이션입니다.
//!
//! # Features
//!
//! - **로컬 계정**: bcrypt 해시 기반 회원가입 / 로그인
//! - **OAuth 2.0**: Google, Facebook 소셜 로그인
//! - **세션**: 불투명 토큰 쿠키 + Redis 세션 저장소
//! - **MongoDB**: 사용자 레코드 영구 저장
//! - **명시적 DI**: 시작 시점에 조립한 서비스를 `web::Data`로 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 페이지 / 폼 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 리다이렉트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← Identity Resolver / Session Manager / OAuth
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / SessionStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use secrets_service::config::AppConfig;
//! use secrets_service::core::AppServices;
//! use secrets_service::repositories::{sessions::InMemorySessionStore, users::InMemoryUserStore};
//!
//! let config = AppConfig::from_env();
//! let services = AppServices::new(
//!     &config,
//!     Arc::new(InMemoryUserStore::new()),
//!     Arc::new(InMemorySessionStore::new()),
//! );
//! let user = services.identity.register_local("alice", "hunter2").await?;
//! let token = services.sessions.create_session(&user).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod views;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
