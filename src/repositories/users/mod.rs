//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserStore`](user_repo::UserStore) 인터페이스와 MongoDB 구현체
//! [`UserRepository`](user_repo::UserRepository)를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let user_repo = UserRepository::new(database.clone(), redis.clone());
//! let user = user_repo.find_user_by_email("user@example.com").await?;
//! ```

pub mod user_repo;

pub use user_repo::{UserRepository, UserStore};
