//! 책 관리 서비스
//!
//! 등록한 사용자 본인 또는 관리자만 책을 수정/삭제할 수 있습니다.

use std::sync::Arc;

use chrono::NaiveDate;
use mongodb::bson::{doc, DateTime, Document};

use crate::domain::dto::books::{BookResponse, CreateBookRequest, UpdateBookRequest};
use crate::domain::entities::books::Book;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::repositories::books::BookStore;
use crate::repositories::reviews::ReviewStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD` 형식의 출간일을 파싱합니다.
pub fn parse_published_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::ValidationError(format!("출간일 형식이 올바르지 않습니다 (YYYY-MM-DD): {}", raw)))
}

/// 요청자가 리소스 소유자이거나 관리자인지 확인합니다.
pub fn ensure_can_modify(user: &AuthenticatedUser, owner_uid: &str) -> Result<(), AppError> {
    if user.can_modify(owner_uid) {
        Ok(())
    } else {
        log::warn!("소유자가 아닌 사용자의 수정 시도 - 사용자: {}, 소유자: {}", user.user_uid, owner_uid);
        Err(AppError::InsufficientPermissions)
    }
}

/// 부분 수정 요청을 `$set` 문서로 변환합니다. `updated_at`은 항상 포함됩니다.
pub fn update_document(request: &UpdateBookRequest) -> Result<Document, AppError> {
    let mut update = doc! { "updated_at": DateTime::now() };

    if let Some(title) = &request.title {
        update.insert("title", title);
    }
    if let Some(author) = &request.author {
        update.insert("author", author);
    }
    if let Some(publisher) = &request.publisher {
        update.insert("publisher", publisher);
    }
    if let Some(raw) = &request.published_date {
        let date = parse_published_date(raw)?;
        update.insert("published_date", date.format(DATE_FORMAT).to_string());
    }
    if let Some(page_count) = request.page_count {
        update.insert("page_count", page_count as i64);
    }
    if let Some(language) = &request.language {
        update.insert("language", language);
    }

    Ok(update)
}

pub struct BookService {
    books: Arc<dyn BookStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self { books, reviews }
    }

    pub async fn list_books(&self) -> Result<Vec<BookResponse>, AppError> {
        let books = self.books.find_all().await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }

    pub async fn list_user_books(&self, user_uid: &str) -> Result<Vec<BookResponse>, AppError> {
        let books = self.books.find_by_user(user_uid).await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }

    pub async fn get_book(&self, book_uid: &str) -> Result<BookResponse, AppError> {
        self.find_existing(book_uid).await.map(BookResponse::from)
    }

    pub async fn create_book(
        &self,
        owner: &AuthenticatedUser,
        request: CreateBookRequest,
    ) -> Result<BookResponse, AppError> {
        let published_date = parse_published_date(&request.published_date)?;
        let now = DateTime::now();

        let book = Book {
            id: None,
            title: request.title,
            author: request.author,
            publisher: request.publisher,
            published_date,
            page_count: request.page_count,
            language: request.language,
            user_uid: owner.user_uid.clone(),
            created_at: now,
            updated_at: now,
        };

        let book = self.books.create(book).await?;
        log::info!("책 등록 - 제목: {}, 사용자: {}", book.title, owner.user_uid);

        Ok(BookResponse::from(book))
    }

    pub async fn update_book(
        &self,
        user: &AuthenticatedUser,
        book_uid: &str,
        request: UpdateBookRequest,
    ) -> Result<BookResponse, AppError> {
        let book = self.find_existing(book_uid).await?;
        ensure_can_modify(user, &book.user_uid)?;

        if request.is_empty() {
            return Ok(BookResponse::from(book));
        }

        let update = update_document(&request)?;

        self.books
            .update(book_uid, update)
            .await?
            .map(BookResponse::from)
            .ok_or_else(|| AppError::NotFound("책을 찾을 수 없습니다".to_string()))
    }

    /// 책과 딸린 리뷰를 함께 삭제합니다.
    pub async fn delete_book(&self, user: &AuthenticatedUser, book_uid: &str) -> Result<(), AppError> {
        let book = self.find_existing(book_uid).await?;
        ensure_can_modify(user, &book.user_uid)?;

        if !self.books.delete(book_uid).await? {
            return Err(AppError::NotFound("책을 찾을 수 없습니다".to_string()));
        }

        let removed = self.reviews.delete_by_book(book_uid).await?;
        log::info!("책 삭제 - ID: {}, 함께 삭제된 리뷰: {}", book_uid, removed);

        Ok(())
    }

    async fn find_existing(&self, book_uid: &str) -> Result<Book, AppError> {
        self.books
            .find_by_id(book_uid)
            .await?
            .ok_or_else(|| AppError::NotFound("책을 찾을 수 없습니다".to_string()))
    }
}
