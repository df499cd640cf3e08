//! 토큰 폐기 레지스트리 모듈
//!
//! 로그아웃된 세션 토큰과 사용이 끝난 액션 토큰의 JTI를 기록합니다.
//!
//! # Features
//!
//! - **RevocationStore**: 폐기 레지스트리 인터페이스 (`revoke`, `is_revoked`)
//! - **TokenBlocklist**: Redis `SET ... EX` 기반 구현, 항목별 자동 만료
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::{RevocationReason, RevocationStore, TokenBlocklist};
//!
//! let blocklist = TokenBlocklist::new(redis.clone());
//! blocklist.revoke(&claims.jti, 3600, RevocationReason::Logout).await?;
//! assert!(blocklist.is_revoked(&claims.jti).await?);
//! ```

pub mod token_repository;

pub use token_repository::*;
