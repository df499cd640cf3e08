use mongodb::bson::DateTime;
use serde::Serialize;

use crate::domain::entities::reviews::Review;

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub uid: String,
    pub rating: u8,
    pub review_text: String,
    pub user_uid: String,
    pub book_uid: String,
    pub created_at: DateTime,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            uid: review.id_string().unwrap_or_default(),
            rating: review.rating,
            review_text: review.review_text,
            user_uid: review.user_uid,
            book_uid: review.book_uid,
            created_at: review.created_at,
        }
    }
}
