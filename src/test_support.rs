//! 테스트용 인메모리 저장소와 메일러

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::{self, oid::ObjectId, DateTime, Document};

use crate::config::AuthSettings;
use crate::domain::entities::books::Book;
use crate::domain::entities::reviews::Review;
use crate::domain::entities::users::{User, UserRole};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::repositories::books::BookStore;
use crate::repositories::reviews::ReviewStore;
use crate::repositories::tokens::{RevocationReason, RevocationStore};
use crate::repositories::users::UserStore;
use crate::services::auth::{AuthGateway, PasswordService, TokenService};
use crate::services::mail::{EmailMessage, Mailer};

pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<ObjectId, User>>,
}

impl InMemoryUserStore {
    /// 비밀번호 해시를 포함한 사용자를 바로 저장합니다.
    pub fn insert(&self, mut user: User) -> User {
        let id = user.id.unwrap_or_else(ObjectId::new);
        user.id = Some(id);
        self.users.lock().unwrap().insert(id, user.clone());
        user
    }

    pub fn insert_with_role(&self, email: &str, role: UserRole) -> User {
        let username = email.split('@').next().unwrap_or("user").to_string();
        let mut user = User::new_local(username, email.to_string(), "Test".to_string(), "User".to_string(), String::new());
        user.role = role;
        self.insert(user)
    }

    pub fn get(&self, id: &ObjectId) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;
        Ok(self.get(&id))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().values().find(|u| u.username == username).cloned())
    }

    async fn save_user(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        let duplicate = users.values().any(|existing| {
            existing.id != user.id && (existing.email == user.email || existing.username == user.username)
        });
        if duplicate {
            return Err(AppError::UserAlreadyExists("이미 사용 중인 이메일 또는 사용자명입니다".to_string()));
        }

        let mut user = user;
        let id = *user.id.get_or_insert_with(ObjectId::new);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, AppError> {
        let id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}

/// 만료 시각을 함께 기록하는 인메모리 블록리스트
#[derive(Default)]
pub struct InMemoryRevocationStore {
    entries: Mutex<HashMap<String, (i64, RevocationReason)>>,
    unavailable: Mutex<bool>,
}

impl InMemoryRevocationStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// 기록된 TTL (초)
    pub fn ttl_of(&self, jti: &str) -> Option<i64> {
        self.entries
            .lock()
            .unwrap()
            .get(jti)
            .map(|(expires_at, _)| expires_at - Utc::now().timestamp())
    }

    pub fn reason_of(&self, jti: &str) -> Option<RevocationReason> {
        self.entries.lock().unwrap().get(jti).map(|(_, reason)| *reason)
    }

    fn check_available(&self) -> Result<(), AppError> {
        if *self.unavailable.lock().unwrap() {
            Err(AppError::RevocationStoreUnavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64, reason: RevocationReason) -> Result<(), AppError> {
        self.check_available()?;
        let expires_at = Utc::now().timestamp() + ttl_seconds.max(1) as i64;
        self.entries.lock().unwrap().insert(jti.to_string(), (expires_at, reason));
        Ok(())
    }

    async fn claim(&self, jti: &str, ttl_seconds: u64, reason: RevocationReason) -> Result<bool, AppError> {
        self.check_available()?;
        let now = Utc::now().timestamp();
        let mut entries = self.entries.lock().unwrap();

        if entries.get(jti).is_some_and(|(expires_at, _)| *expires_at > now) {
            return Ok(false);
        }

        entries.insert(jti.to_string(), (now + ttl_seconds.max(1) as i64, reason));
        Ok(true)
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        self.check_available()?;
        let now = Utc::now().timestamp();
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(jti)
            .is_some_and(|(expires_at, _)| *expires_at > now))
    }
}

fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// 등록 순서를 유지하는 인메모리 책 저장소
#[derive(Default)]
pub struct InMemoryBookStore {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBookStore {
    /// 주어진 사용자가 등록한 책을 바로 저장합니다.
    pub fn insert_for(&self, user_uid: &str, title: &str) -> Book {
        let now = DateTime::now();
        let book = Book {
            id: Some(ObjectId::new()),
            title: title.to_string(),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            published_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            page_count: 320,
            language: "en".to_string(),
            user_uid: user_uid.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.books.lock().unwrap().push(book.clone());
        book
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find_all(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.books.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn find_by_user(&self, user_uid: &str) -> Result<Vec<Book>, AppError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|book| book.user_uid == user_uid)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, AppError> {
        let Some(id) = parse_object_id(id) else {
            return Ok(None);
        };
        Ok(self.books.lock().unwrap().iter().find(|book| book.id == Some(id)).cloned())
    }

    async fn create(&self, mut book: Book) -> Result<Book, AppError> {
        book.id = Some(ObjectId::new());
        self.books.lock().unwrap().push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: &str, update_doc: Document) -> Result<Option<Book>, AppError> {
        let Some(id) = parse_object_id(id) else {
            return Ok(None);
        };
        let mut books = self.books.lock().unwrap();
        let Some(book) = books.iter_mut().find(|book| book.id == Some(id)) else {
            return Ok(None);
        };

        let mut document = bson::to_document(&*book).unwrap();
        document.extend(update_doc);
        *book = bson::from_document(document).unwrap();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(id) = parse_object_id(id) else {
            return Ok(false);
        };
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|book| book.id != Some(id));
        Ok(books.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: Mutex<Vec<Review>>,
}

impl InMemoryReviewStore {
    pub fn insert_for(&self, user_uid: &str, book_uid: &str) -> Review {
        let now = DateTime::now();
        let review = Review {
            id: Some(ObjectId::new()),
            rating: 4,
            review_text: "Worth reading".to_string(),
            user_uid: user_uid.to_string(),
            book_uid: book_uid.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.reviews.lock().unwrap().push(review.clone());
        review
    }

    pub fn count(&self) -> usize {
        self.reviews.lock().unwrap().len()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn find_by_book(&self, book_uid: &str) -> Result<Vec<Review>, AppError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|review| review.book_uid == book_uid)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError> {
        let Some(id) = parse_object_id(id) else {
            return Ok(None);
        };
        Ok(self.reviews.lock().unwrap().iter().find(|review| review.id == Some(id)).cloned())
    }

    async fn create(&self, mut review: Review) -> Result<Review, AppError> {
        review.id = Some(ObjectId::new());
        self.reviews.lock().unwrap().push(review.clone());
        Ok(review)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(id) = parse_object_id(id) else {
            return Ok(false);
        };
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|review| review.id != Some(id));
        Ok(reviews.len() < before)
    }

    async fn delete_by_book(&self, book_uid: &str) -> Result<u64, AppError> {
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|review| review.book_uid != book_uid);
        Ok((before - reviews.len()) as u64)
    }
}

/// 인증된 사용자 정보를 직접 만듭니다.
pub fn caller(user_uid: &str, role: UserRole) -> AuthenticatedUser {
    AuthenticatedUser {
        user_uid: user_uid.to_string(),
        email: format!("{}@example.com", user_uid),
        role,
        jti: "jti".to_string(),
        expires_at: 0,
    }
}

/// 보낸 메일을 기록만 하는 메일러
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// 테스트용 인증 구성 요소 묶음
pub struct AuthFixture {
    pub tokens: Arc<TokenService>,
    pub revocations: Arc<InMemoryRevocationStore>,
    pub users: Arc<InMemoryUserStore>,
    pub gateway: Arc<AuthGateway>,
}

impl AuthFixture {
    pub fn new() -> Self {
        let tokens = Arc::new(TokenService::new(AuthSettings::new(TEST_SECRET)));
        let revocations = Arc::new(InMemoryRevocationStore::default());
        let users = Arc::new(InMemoryUserStore::default());
        let gateway = Arc::new(AuthGateway::new(tokens.clone(), revocations.clone(), users.clone()));

        Self { tokens, revocations, users, gateway }
    }

    pub fn passwords() -> Arc<PasswordService> {
        Arc::new(PasswordService::new(4))
    }
}
