use std::sync::Arc;

use mongodb::bson::DateTime;

use crate::domain::dto::reviews::{CreateReviewRequest, ReviewResponse};
use crate::domain::entities::reviews::Review;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::repositories::books::BookStore;
use crate::repositories::reviews::ReviewStore;
use crate::services::books::book_service::ensure_can_modify;

/// 리뷰 서비스
///
/// 리뷰는 존재하는 책에만 작성할 수 있고, 작성자 본인 또는 관리자만 삭제할 수 있습니다.
pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
    books: Arc<dyn BookStore>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewStore>, books: Arc<dyn BookStore>) -> Self {
        Self { reviews, books }
    }

    pub async fn add_review(
        &self,
        author: &AuthenticatedUser,
        book_uid: &str,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        if self.books.find_by_id(book_uid).await?.is_none() {
            return Err(AppError::NotFound("책을 찾을 수 없습니다".to_string()));
        }

        let now = DateTime::now();
        let review = Review {
            id: None,
            rating: request.rating,
            review_text: request.review_text,
            user_uid: author.user_uid.clone(),
            book_uid: book_uid.to_string(),
            created_at: now,
            updated_at: now,
        };

        let review = self.reviews.create(review).await?;
        log::info!("리뷰 작성 - 책: {}, 사용자: {}", book_uid, author.user_uid);

        Ok(ReviewResponse::from(review))
    }

    pub async fn list_book_reviews(&self, book_uid: &str) -> Result<Vec<ReviewResponse>, AppError> {
        if self.books.find_by_id(book_uid).await?.is_none() {
            return Err(AppError::NotFound("책을 찾을 수 없습니다".to_string()));
        }

        let reviews = self.reviews.find_by_book(book_uid).await?;
        Ok(reviews.into_iter().map(ReviewResponse::from).collect())
    }

    pub async fn delete_review(&self, user: &AuthenticatedUser, review_uid: &str) -> Result<(), AppError> {
        let review = self.reviews
            .find_by_id(review_uid)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        ensure_can_modify(user, &review.user_uid)?;

        if !self.reviews.delete(review_uid).await? {
            return Err(AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()));
        }

        log::info!("리뷰 삭제 - ID: {}, 요청자: {}", review_uid, user.user_uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::UserRole;
    use crate::test_support::{caller, InMemoryBookStore, InMemoryReviewStore};

    struct Harness {
        books: Arc<InMemoryBookStore>,
        reviews: Arc<InMemoryReviewStore>,
        service: ReviewService,
    }

    fn harness() -> Harness {
        let books = Arc::new(InMemoryBookStore::default());
        let reviews = Arc::new(InMemoryReviewStore::default());
        let service = ReviewService::new(reviews.clone(), books.clone());

        Harness { books, reviews, service }
    }

    fn review(rating: u8) -> CreateReviewRequest {
        CreateReviewRequest {
            rating,
            review_text: "A slow start but a great ending".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_add_review_to_existing_book() {
        let h = harness();
        let book_uid = h.books.insert_for("owner", "Dune").id_string().unwrap();

        let created = h.service.add_review(&caller("reader", UserRole::User), &book_uid, review(5)).await.unwrap();

        assert_eq!(created.user_uid, "reader");
        assert_eq!(created.book_uid, book_uid);
        let listed = h.service.list_book_reviews(&book_uid).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].rating, 5);
    }

    #[actix_web::test]
    async fn test_add_review_to_missing_book() {
        let h = harness();
        let missing = mongodb::bson::oid::ObjectId::new().to_hex();

        let result = h.service.add_review(&caller("reader", UserRole::User), &missing, review(3)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(h.reviews.count(), 0);
    }

    #[actix_web::test]
    async fn test_delete_review_owner_or_admin() {
        let h = harness();
        let book_uid = h.books.insert_for("owner", "Dune").id_string().unwrap();
        let by_author = h.reviews.insert_for("reader", &book_uid).id_string().unwrap();
        let by_other = h.reviews.insert_for("critic", &book_uid).id_string().unwrap();

        let denied = h.service.delete_review(&caller("stranger", UserRole::User), &by_author).await;
        assert!(matches!(denied, Err(AppError::InsufficientPermissions)));
        assert_eq!(h.reviews.count(), 2);

        h.service.delete_review(&caller("reader", UserRole::User), &by_author).await.unwrap();
        h.service.delete_review(&caller("admin", UserRole::Admin), &by_other).await.unwrap();
        assert_eq!(h.reviews.count(), 0);
    }

    #[actix_web::test]
    async fn test_delete_missing_review() {
        let h = harness();

        let result = h.service.delete_review(&caller("admin", UserRole::Admin), "not-an-id").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
