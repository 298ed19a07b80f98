//! # Identity Resolver
//!
//! 로컬 자격 증명 또는 외부 프로바이더 프로필을 정확히 하나의 사용자 레코드로 변환합니다.
//!
//! ## 동작 요약
//!
//! | 연산 | 저장소 쓰기 | 실패 |
//! |------|-------------|------|
//! | `authenticate_local` | 없음 | `AuthFailure` (사유 구분 없음) |
//! | `register_local` | 생성 1회 | `DuplicateIdentifier`, `ValidationError` |
//! | `find_or_create_by_provider` | 처음 보는 ID일 때만 생성 | 저장소 장애만 |
//!
//! ## 동시 최초 로그인
//!
//! 같은 외부 계정으로 두 요청이 동시에 처음 로그인하면 둘 다 "없음"을 볼 수 있습니다.
//! 프로바이더 ID 유니크 인덱스 덕분에 두 번째 생성은 충돌로 실패하고, 이때 다시 조회하여
//! 먼저 만들어진 레코드를 돌려줍니다.
//!
//! 저장소 장애는 항상 `StoreUnavailable`로 전파되며 인증 실패와 섞이지 않습니다.

use std::sync::Arc;
use log::{info, warn};
use crate::config::AuthProvider;
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult, ErrorContext, RegistrationFailure};
use crate::repositories::users::UserStore;

pub struct IdentityService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// 사용자명과 비밀번호로 로그인합니다.
    ///
    /// 사용자 없음, 비밀번호 없는(외부 프로바이더 전용) 계정, 비밀번호 불일치는 모두
    /// 같은 `AuthFailure`로 실패합니다.
    ///
    /// # Arguments
    ///
    /// * `identifier` - 로컬 계정 식별자 (`username`)
    /// * `password` - 평문 비밀번호
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let user = identity.authenticate_local("alice", "hunter2").await?;
    /// ```
    pub async fn authenticate_local(&self, identifier: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.users.find_by_username(identifier).await? else {
            info!("로컬 로그인 실패: 인증 정보 불일치");
            return Err(AppError::AuthFailure);
        };

        let Some(password_hash) = user.password_hash.as_deref() else {
            info!("로컬 로그인 실패: 인증 정보 불일치");
            return Err(AppError::AuthFailure);
        };

        let is_valid = bcrypt::verify(password, password_hash).unwrap_or_else(|e| {
            warn!("저장된 비밀번호 해시를 검증할 수 없습니다: {}", e);
            false
        });

        if !is_valid {
            info!("로컬 로그인 실패: 인증 정보 불일치");
            return Err(AppError::AuthFailure);
        }

        info!("로컬 로그인 성공: {}", user.id_string().unwrap_or_default());
        Ok(user)
    }

    /// 새 로컬 계정을 등록합니다. 성공한 사용자는 곧바로 로그인된 것으로 취급됩니다.
    ///
    /// # Errors
    ///
    /// * `Registration(DuplicateIdentifier)` - 이미 사용 중인 식별자 (비밀번호와 무관)
    /// * `ValidationError` - 빈 식별자 또는 빈 비밀번호
    /// * `StoreUnavailable` - 저장소 장애
    pub async fn register_local(&self, identifier: &str, password: &str) -> AppResult<User> {
        if identifier.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError("사용자명과 비밀번호는 필수입니다".to_string()));
        }

        if self.users.find_by_username(identifier).await?.is_some() {
            info!("회원가입 실패: 이미 사용 중인 식별자");
            return Err(RegistrationFailure::DuplicateIdentifier.into());
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;

        let user = match self.users.create(User::new_local(identifier.to_string(), password_hash)).await {
            Ok(user) => user,
            // 조회와 생성 사이에 같은 식별자가 먼저 등록된 경우
            Err(AppError::ConflictError(_)) => {
                return Err(RegistrationFailure::DuplicateIdentifier.into());
            }
            Err(e) => return Err(e),
        };

        info!("✅ 신규 로컬 사용자 등록: {}", user.id_string().unwrap_or_default());
        Ok(user)
    }

    /// 외부 프로바이더 ID로 사용자를 찾고, 없으면 해당 ID만 가진 사용자를 만듭니다.
    ///
    /// 같은 `(provider, provider_id)`로 여러 번 호출해도 항상 같은 사용자를 돌려주며
    /// 레코드는 한 번만 생성됩니다.
    pub async fn find_or_create_by_provider(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> AppResult<User> {
        if let Some(user) = self.users.find_by_provider_id(provider, provider_id).await? {
            return Ok(user);
        }

        match self.users.create(User::new_oauth(provider, provider_id.to_string())).await {
            Ok(user) => {
                info!(
                    "✅ 신규 {} 사용자 생성: {}",
                    provider.as_str(),
                    user.id_string().unwrap_or_default()
                );
                Ok(user)
            }
            Err(AppError::ConflictError(_)) => {
                warn!("{} 최초 로그인 경합 감지, 기존 레코드 재조회", provider.as_str());
                self.users
                    .find_by_provider_id(provider, provider_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::StoreUnavailable(format!(
                            "{} 사용자 생성 충돌 후 레코드를 찾을 수 없습니다",
                            provider.as_str()
                        ))
                    })
            }
            Err(e) => Err(e),
        }
    }

    /// 사용자의 비밀을 무조건 덮어씁니다.
    ///
    /// 그 사이 레코드가 사라졌다면 `Unauthenticated`.
    pub async fn submit_secret(&self, user: &User, secret: &str) -> AppResult<()> {
        let id = user.id.as_ref().ok_or(AppError::Unauthenticated)?;

        if !self.users.update_secret(id, secret).await? {
            return Err(AppError::Unauthenticated);
        }

        info!("비밀 제출: {}", id.to_hex());
        Ok(())
    }

    /// 비밀을 제출한 모든 사용자
    pub async fn users_with_secrets(&self) -> AppResult<Vec<User>> {
        self.users.find_with_secrets().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use crate::repositories::users::InMemoryUserStore;

    const TEST_COST: u32 = 4;

    fn service() -> (IdentityService, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        (IdentityService::new(store.clone(), TEST_COST), store)
    }

    #[actix_web::test]
    async fn test_register_then_authenticate_yields_same_user() {
        let (identity, _) = service();

        let registered = identity.register_local("alice", "hunter2").await.unwrap();
        let authenticated = identity.authenticate_local("alice", "hunter2").await.unwrap();

        assert!(registered.id.is_some());
        assert_eq!(registered.id, authenticated.id);
        // 평문 비밀번호는 저장되지 않음
        assert_ne!(authenticated.password_hash.as_deref(), Some("hunter2"));
    }

    #[actix_web::test]
    async fn test_duplicate_registration_regardless_of_password() {
        let (identity, store) = service();
        identity.register_local("alice", "hunter2").await.unwrap();

        let second = identity.register_local("alice", "different").await;

        assert!(matches!(
            second,
            Err(AppError::Registration(RegistrationFailure::DuplicateIdentifier))
        ));
        assert_eq!(store.create_count(), 1);
    }

    #[actix_web::test]
    async fn test_auth_failure_is_generic() {
        let (identity, _) = service();
        identity.register_local("alice", "hunter2").await.unwrap();

        let wrong_password = identity.authenticate_local("alice", "wrongpass").await;
        let unknown_user = identity.authenticate_local("mallory", "hunter2").await;

        assert!(matches!(wrong_password, Err(AppError::AuthFailure)));
        assert!(matches!(unknown_user, Err(AppError::AuthFailure)));
    }

    #[actix_web::test]
    async fn test_provider_only_account_cannot_password_login() {
        let (identity, store) = service();
        store
            .create(User {
                username: Some("carol".to_string()),
                ..User::new_oauth(AuthProvider::Google, "g-carol".to_string())
            })
            .await
            .unwrap();

        let result = identity.authenticate_local("carol", "").await;
        assert!(matches!(result, Err(AppError::AuthFailure)));
    }

    #[actix_web::test]
    async fn test_register_rejects_empty_credentials() {
        let (identity, store) = service();

        assert!(matches!(
            identity.register_local("", "pw").await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            identity.register_local("alice", "").await,
            Err(AppError::ValidationError(_))
        ));
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn test_find_or_create_is_idempotent() {
        let (identity, store) = service();

        let first = identity.find_or_create_by_provider(AuthProvider::Google, "X").await.unwrap();
        let second = identity.find_or_create_by_provider(AuthProvider::Google, "X").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.create_count(), 1);
    }

    #[actix_web::test]
    async fn test_same_id_on_different_providers_are_different_users() {
        let (identity, _) = service();

        let google = identity.find_or_create_by_provider(AuthProvider::Google, "42").await.unwrap();
        let facebook = identity.find_or_create_by_provider(AuthProvider::Facebook, "42").await.unwrap();

        assert_ne!(google.id, facebook.id);
    }

    /// 첫 번째 프로바이더 조회만 "없음"을 돌려주는 저장소 (경합 재현용)
    struct RacyStore {
        inner: InMemoryUserStore,
        missed: AtomicBool,
    }

    #[async_trait]
    impl UserStore for RacyStore {
        async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
            self.inner.find_by_username(username).await
        }

        async fn find_by_provider_id(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<User>> {
            if !self.missed.swap(true, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_provider_id(provider, provider_id).await
        }

        async fn create(&self, user: User) -> AppResult<User> {
            self.inner.create(user).await
        }

        async fn update_secret(&self, id: &ObjectId, secret: &str) -> AppResult<bool> {
            self.inner.update_secret(id, secret).await
        }

        async fn find_with_secrets(&self) -> AppResult<Vec<User>> {
            self.inner.find_with_secrets().await
        }
    }

    #[actix_web::test]
    async fn test_concurrent_first_login_returns_winner() {
        let inner = InMemoryUserStore::new();
        let winner = inner
            .create(User::new_oauth(AuthProvider::Google, "X".to_string()))
            .await
            .unwrap();
        let store = Arc::new(RacyStore { inner, missed: AtomicBool::new(false) });
        let identity = IdentityService::new(store.clone(), TEST_COST);

        let resolved = identity.find_or_create_by_provider(AuthProvider::Google, "X").await.unwrap();

        assert_eq!(resolved.id, winner.id);
        assert_eq!(store.inner.create_count(), 1);
    }

    #[actix_web::test]
    async fn test_submit_secret_overwrites() {
        let (identity, _) = service();
        let alice = identity.register_local("alice", "hunter2").await.unwrap();

        identity.submit_secret(&alice, "first").await.unwrap();
        identity.submit_secret(&alice, "second").await.unwrap();

        let listed = identity.users_with_secrets().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].secret.as_deref(), Some("second"));
    }

    #[actix_web::test]
    async fn test_submit_secret_for_vanished_user() {
        let (identity, _) = service();
        let ghost = User {
            id: Some(ObjectId::new()),
            ..User::new_local("ghost".to_string(), "hash".to_string())
        };

        let result = identity.submit_secret(&ghost, "boo").await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}
