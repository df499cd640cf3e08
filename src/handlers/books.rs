//! # Book HTTP Handlers
//!
//! `/api/v1/books` 스코프. 모든 엔드포인트는 로그인한 `user` 또는 `admin`만 사용할 수 있고,
//! 수정/삭제는 등록자 본인 또는 관리자만 가능합니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::books::{CreateBookRequest, UpdateBookRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::books::BookService;

#[get("")]
pub async fn list_books(books: web::Data<BookService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(books.list_books().await?))
}

#[get("/user/{user_uid}")]
pub async fn list_user_books(
    books: web::Data<BookService>,
    user_uid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(books.list_user_books(&user_uid).await?))
}

#[get("/{book_uid}")]
pub async fn get_book(
    books: web::Data<BookService>,
    book_uid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(books.get_book(&book_uid).await?))
}

#[post("")]
pub async fn create_book(
    user: AuthenticatedUser,
    books: web::Data<BookService>,
    payload: web::Json<CreateBookRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let book = books.create_book(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(book))
}

#[patch("/{book_uid}")]
pub async fn update_book(
    user: AuthenticatedUser,
    books: web::Data<BookService>,
    book_uid: web::Path<String>,
    payload: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let book = books.update_book(&user, &book_uid, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(book))
}

#[delete("/{book_uid}")]
pub async fn delete_book(
    user: AuthenticatedUser,
    books: web::Data<BookService>,
    book_uid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    books.delete_book(&user, &book_uid).await?;

    Ok(HttpResponse::NoContent().finish())
}
