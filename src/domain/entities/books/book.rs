//! 책 엔티티

use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `books` 컬렉션 문서
///
/// `user_uid`는 책을 등록한 사용자의 ObjectId 16진수 문자열입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
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

impl Book {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
