use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Collection,
};

use crate::db::Database;
use crate::domain::entities::books::Book;
use crate::errors::errors::AppError;

const COLLECTION: &str = "books";

/// 책 저장소 인터페이스
///
/// 잘못된 형식의 ID는 존재하지 않는 책과 같게 취급합니다.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// 전체 책 목록 (최신 등록 순)
    async fn find_all(&self) -> Result<Vec<Book>, AppError>;

    /// 특정 사용자가 등록한 책 목록 (최신 등록 순)
    async fn find_by_user(&self, user_uid: &str) -> Result<Vec<Book>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, AppError>;

    async fn create(&self, book: Book) -> Result<Book, AppError>;

    /// `$set` 문서로 부분 수정하고 수정 후 문서를 반환합니다.
    async fn update(&self, id: &str, update_doc: Document) -> Result<Option<Book>, AppError>;

    /// 삭제되었으면 `true`
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// MongoDB `books` 컬렉션 리포지토리
pub struct BookRepository {
    db: Arc<Database>,
}

impl BookRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Book> {
        self.db.get_database().collection::<Book>(COLLECTION)
    }

    /// 문자열 ID를 ObjectId로 변환합니다. 형식이 잘못되면 `None`을 반환합니다.
    ///
    /// 존재하지 않는 책과 잘못된 ID를 같은 404로 처리하기 위함입니다.
    fn parse_id(id: &str) -> Option<ObjectId> {
        ObjectId::parse_str(id).ok()
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Book>, AppError> {
        self.collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl BookStore for BookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, AppError> {
        self.find_many(doc! {}).await
    }

    async fn find_by_user(&self, user_uid: &str) -> Result<Vec<Book>, AppError> {
        self.find_many(doc! { "user_uid": user_uid }).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, AppError> {
        let Some(object_id) = Self::parse_id(id) else {
            return Ok(None);
        };

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut book: Book) -> Result<Book, AppError> {
        let result = self.collection()
            .insert_one(&book)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        book.id = result.inserted_id.as_object_id();
        Ok(book)
    }

    async fn update(&self, id: &str, update_doc: Document) -> Result<Option<Book>, AppError> {
        let Some(object_id) = Self::parse_id(id) else {
            return Ok(None);
        };

        self.collection()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": update_doc })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(object_id) = Self::parse_id(id) else {
            return Ok(false);
        };

        let result = self.collection()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
