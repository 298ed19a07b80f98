//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다. 서비스 계층은 [`UserStore`] trait 에만 의존하고,
//! 운영 환경에서는 [`MongoUserRepository`], 테스트에서는
//! [`InMemoryUserStore`](super::memory::InMemoryUserStore)가 주입됩니다.
//!
//! ## 유니크 제약
//!
//! `username`, `googleId`, `facebookId` 는 값이 있을 때에만 유일해야 하므로 sparse 유니크
//! 인덱스로 관리합니다. 제약 위반은 `AppError::ConflictError`로 보고되며, 호출자가
//! 상황에 맞는 의미(중복 가입, 동시 최초 로그인)로 해석합니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::info;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::config::AuthProvider;
use crate::db::Database;
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};

/// MongoDB duplicate key 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 저장소 계약
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    /// 로컬 계정 식별자로 조회
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// 외부 프로바이더 ID로 조회
    async fn find_by_provider_id(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 ID가 채워진 레코드를 반환합니다.
    ///
    /// 유니크 필드가 이미 사용 중이면 `AppError::ConflictError`.
    async fn create(&self, user: User) -> AppResult<User>;

    /// `secret` 필드를 덮어씁니다. 대상 레코드가 없으면 `false`.
    async fn update_secret(&self, id: &ObjectId, secret: &str) -> AppResult<bool>;

    /// `secret`이 있는 모든 사용자
    async fn find_with_secrets(&self) -> AppResult<Vec<User>>;
}

/// MongoDB 기반 사용자 리포지토리
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.get_database().collection::<User>(collection_name),
        }
    }

    /// 유니크 sparse 인덱스를 생성합니다. 이미 존재하면 아무 일도 하지 않습니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let unique_sparse = |field: &str| {
            IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name(format!("{}_unique", field))
                    .build())
                .build()
        };

        self.collection
            .create_indexes([
                unique_sparse("username"),
                unique_sparse(AuthProvider::Google.user_field()),
                unique_sparse(AuthProvider::Facebook.user_field()),
            ])
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        info!("✅ users 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

/// 쓰기 에러를 저장소 장애와 유니크 제약 위반으로 구분합니다.
fn map_write_error(error: mongodb::error::Error) -> AppError {
    match *error.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            AppError::ConflictError(write_error.message.clone())
        }
        _ => AppError::StoreUnavailable(error.to_string()),
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }

    async fn find_by_provider_id(&self, provider: AuthProvider, provider_id: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { provider.user_field(): provider_id })
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string())
        })?;
        user.id = Some(id);

        Ok(user)
    }

    async fn update_secret(&self, id: &ObjectId, secret: &str) -> AppResult<bool> {
        let result = self.collection
            .update_one(doc! { "_id": *id }, doc! { "$set": { "secret": secret } })
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    async fn find_with_secrets(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection
            .find(doc! { "secret": { "$ne": null } })
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }
}
