//! Users Entity Module
//!
//! 사용자 문서([`User`](user::User))와 역할([`UserRole`](user::UserRole))을 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! let user = User::new_local(
//!     "reader".to_string(),
//!     "reader@example.com".to_string(),
//!     "Ada".to_string(),
//!     "Lovelace".to_string(),
//!     hashed_password,
//! );
//! ```

pub mod user;

pub use user::{User, UserRole};
