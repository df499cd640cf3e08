use chrono::NaiveDate;
use mongodb::bson::DateTime;
use serde::Serialize;

use crate::domain::entities::books::Book;

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub uid: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub published_date: NaiveDate,
    pub page_count: u32,
    pub language: String,
    pub user_uid: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            uid: book.id_string().unwrap_or_default(),
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            published_date: book.published_date,
            page_count: book.page_count,
            language: book.language,
            user_uid: book.user_uid,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}
