use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};

use crate::db::Database;
use crate::domain::entities::reviews::Review;
use crate::errors::errors::AppError;

const COLLECTION: &str = "reviews";

/// 리뷰 저장소 인터페이스
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// 책에 달린 리뷰 목록 (최신 순)
    async fn find_by_book(&self, book_uid: &str) -> Result<Vec<Review>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError>;

    async fn create(&self, review: Review) -> Result<Review, AppError>;

    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// 책 삭제 시 딸린 리뷰를 함께 정리하고 삭제 건수를 반환합니다.
    async fn delete_by_book(&self, book_uid: &str) -> Result<u64, AppError>;
}

/// MongoDB `reviews` 컬렉션 리포지토리
pub struct ReviewRepository {
    db: Arc<Database>,
}

impl ReviewRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Review> {
        self.db.get_database().collection::<Review>(COLLECTION)
    }
}

#[async_trait]
impl ReviewStore for ReviewRepository {
    async fn find_by_book(&self, book_uid: &str) -> Result<Vec<Review>, AppError> {
        self.collection()
            .find(doc! { "book_uid": book_uid })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut review: Review) -> Result<Review, AppError> {
        let result = self.collection()
            .insert_one(&review)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        review.id = result.inserted_id.as_object_id();
        Ok(review)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self.collection()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_by_book(&self, book_uid: &str) -> Result<u64, AppError> {
        let result = self.collection()
            .delete_many(doc! { "book_uid": book_uid })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
