//! 리뷰 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `reviews` 컬렉션 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 1-5 별점
    pub rating: u8,
    pub review_text: String,
    pub user_uid: String,
    pub book_uid: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Review {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
