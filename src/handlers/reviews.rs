//! # Review HTTP Handlers

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::reviews::CreateReviewRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::reviews::ReviewService;

#[post("/book/{book_uid}")]
pub async fn add_review(
    user: AuthenticatedUser,
    reviews: web::Data<ReviewService>,
    book_uid: web::Path<String>,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let review = reviews.add_review(&user, &book_uid, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(review))
}

#[get("/book/{book_uid}")]
pub async fn list_book_reviews(
    reviews: web::Data<ReviewService>,
    book_uid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(reviews.list_book_reviews(&book_uid).await?))
}

#[delete("/{review_uid}")]
pub async fn delete_review(
    user: AuthenticatedUser,
    reviews: web::Data<ReviewService>,
    review_uid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    reviews.delete_review(&user, &review_uid).await?;

    Ok(HttpResponse::NoContent().finish())
}
