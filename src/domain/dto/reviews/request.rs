use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "별점은 1-5 사이여야 합니다"))]
    pub rating: u8,

    #[validate(length(min = 1, max = 2000, message = "리뷰는 1-2000자 사이여야 합니다"))]
    pub review_text: String,
}
