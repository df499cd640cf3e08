//! 책 등록/수정 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 책 등록 요청
///
/// `published_date`는 `YYYY-MM-DD` 형식의 문자열입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1-200자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "저자는 1-100자 사이여야 합니다"))]
    pub author: String,

    #[validate(length(min = 1, max = 100, message = "출판사는 1-100자 사이여야 합니다"))]
    pub publisher: String,

    pub published_date: String,

    #[validate(range(min = 1, message = "페이지 수는 1 이상이어야 합니다"))]
    pub page_count: u32,

    #[validate(length(min = 1, max = 30, message = "언어는 1-30자 사이여야 합니다"))]
    pub language: String,
}

/// 책 부분 수정 요청
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1-200자 사이여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "저자는 1-100자 사이여야 합니다"))]
    pub author: Option<String>,

    #[validate(length(min = 1, max = 100, message = "출판사는 1-100자 사이여야 합니다"))]
    pub publisher: Option<String>,

    /// `YYYY-MM-DD`
    pub published_date: Option<String>,

    #[validate(range(min = 1, message = "페이지 수는 1 이상이어야 합니다"))]
    pub page_count: Option<u32>,

    #[validate(length(min = 1, max = 30, message = "언어는 1-30자 사이여야 합니다"))]
    pub language: Option<String>,
}

impl UpdateBookRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.publisher.is_none()
            && self.published_date.is_none()
            && self.page_count.is_none()
            && self.language.is_none()
    }
}
