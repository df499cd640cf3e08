//! 사용자 리포지토리
//!
//! [`UserStore`] 트레이트는 인증 코어가 사용자 저장소에 요구하는 최소 인터페이스이고,
//! [`UserRepository`]는 MongoDB + Redis 캐시로 이를 구현합니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    caching::redis::RedisClient,
    db::Database,
    domain::entities::users::User,
};
use crate::errors::errors::AppError;

const COLLECTION: &str = "users";
const CACHE_TTL_SECONDS: u64 = 600;
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 저장소 인터페이스
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// `id`가 ObjectId 형식이 아니면 `ValidationError`를 반환합니다.
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// `id`가 없으면 새로 삽입하고, 있으면 문서 전체를 교체합니다.
    ///
    /// 이메일 또는 사용자명이 중복되면 `UserAlreadyExists`를 반환합니다.
    async fn save_user(&self, user: User) -> Result<User, AppError>;

    /// 삭제되었으면 `true`, 대상이 없었으면 `false`
    async fn delete_user(&self, id: &str) -> Result<bool, AppError>;
}

/// MongoDB 기반 사용자 리포지토리
///
/// 조회 결과는 Redis에 10분간 캐시되며, 저장/삭제 시 해당 키를 무효화합니다.
/// 캐시 오류는 조회를 실패시키지 않습니다.
pub struct UserRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(COLLECTION)
    }

    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    fn id_cache_key(id: &str) -> String {
        format!("user:id:{}", id)
    }

    fn parse_id(id: &str) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
    }

    async fn cache_user(&self, key: &str, user: &User) {
        if let Err(e) = self.redis.set_with_expiry(key, user, CACHE_TTL_SECONDS).await {
            log::debug!("사용자 캐시 저장 실패 ({}): {}", key, e);
        }
    }

    async fn invalidate(&self, user: &User) {
        let mut keys = vec![Self::email_cache_key(&user.email)];
        if let Some(id) = user.id_string() {
            keys.push(Self::id_cache_key(&id));
        }

        for key in keys {
            if let Err(e) = self.redis.del(&key).await {
                log::warn!("사용자 캐시 무효화 실패 ({}): {}", key, e);
            }
        }
    }

    /// 이메일/사용자명 유니크 인덱스와 생성일 인덱스를 만듭니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, username_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = Self::email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = Self::parse_id(id)?;
        let cache_key = Self::id_cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save_user(&self, mut user: User) -> Result<User, AppError> {
        match user.id {
            None => {
                let result = self.collection()
                    .insert_one(&user)
                    .await
                    .map_err(|e| {
                        if is_duplicate_key(&e) {
                            AppError::UserAlreadyExists("이미 사용 중인 이메일 또는 사용자명입니다".to_string())
                        } else {
                            AppError::DatabaseError(e.to_string())
                        }
                    })?;

                let id = result.inserted_id.as_object_id().ok_or_else(|| {
                    AppError::DatabaseError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string())
                })?;
                user.id = Some(id);
            }
            Some(id) => {
                let result = self.collection()
                    .replace_one(doc! { "_id": id }, &user)
                    .await
                    .map_err(|e| {
                        if is_duplicate_key(&e) {
                            AppError::UserAlreadyExists("이미 사용 중인 이메일 또는 사용자명입니다".to_string())
                        } else {
                            AppError::DatabaseError(e.to_string())
                        }
                    })?;

                if result.matched_count == 0 {
                    return Err(AppError::UserNotFound);
                }
            }
        }

        self.invalidate(&user).await;

        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, AppError> {
        let object_id = Self::parse_id(id)?;

        let existing = self.collection()
            .find_one_and_delete(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match existing {
            Some(user) => {
                self.invalidate(&user).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
