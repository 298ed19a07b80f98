//! 메모리 기반 사용자 저장소
//!
//! 테스트와 로컬 실험용 구현입니다. MongoDB 구현과 같은 유니크 규칙을 지키고,
//! 생성 횟수를 세어 "정확히 한 번 생성" 같은 성질을 검증할 수 있게 합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::config::AuthProvider;
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};
use super::user_repo::UserStore;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
    creates: AtomicUsize,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 성공한 `create` 호출 수
    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, Vec<User>>> {
        self.users
            .read()
            .map_err(|_| AppError::StoreUnavailable("user store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, Vec<User>>> {
        self.users
            .write()
            .map_err(|_| AppError::StoreUnavailable("user store lock poisoned".to_string()))
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> AppResult<Option<User>> {
        Ok(self.read()?.iter().find(|user| predicate(user)).cloned())
    }
}

fn same(left: &Option<String>, right: &Option<String>) -> bool {
    matches!((left, right), (Some(a), Some(b)) if a == b)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.find(|user| user.id.as_ref() == Some(id))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.find(|user| user.username.as_deref() == Some(username))
    }

    async fn find_by_provider_id(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<User>> {
        self.find(|user| user.provider_id(provider) == Some(provider_id))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.write()?;

        let conflict = users.iter().find_map(|existing| {
            if same(&existing.username, &user.username) {
                Some("username")
            } else if same(&existing.google_id, &user.google_id) {
                Some("googleId")
            } else if same(&existing.facebook_id, &user.facebook_id) {
                Some("facebookId")
            } else {
                None
            }
        });
        if let Some(field) = conflict {
            return Err(AppError::ConflictError(format!("duplicate key: {}", field)));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        self.creates.fetch_add(1, Ordering::SeqCst);

        Ok(user)
    }

    async fn update_secret(&self, id: &ObjectId, secret: &str) -> AppResult<bool> {
        let mut users = self.write()?;
        match users.iter_mut().find(|user| user.id.as_ref() == Some(id)) {
            Some(user) => {
                user.secret = Some(secret.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_with_secrets(&self) -> AppResult<Vec<User>> {
        Ok(self.read()?.iter().filter(|user| user.secret.is_some()).cloned().collect())
    }
}
