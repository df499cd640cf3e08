//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `main`에서 필요한 핸들을 받아 명시적으로 생성되고
//! `web::Data`로 핸들러에 주입됩니다.
//!
//! # Features
//!
//! - 인증 코어 (비밀번호 해싱, 토큰 발급/검증, 블록리스트, 역할 검사)
//! - 회원가입, 이메일 인증, 비밀번호 재설정
//! - 책/리뷰 관리와 소유자 확인
//! - 트랜잭션 메일 발송
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::AuthGateway, users::UserService};
//!
//! let gateway = Arc::new(AuthGateway::new(tokens, blocklist, user_repo.clone()));
//! let user_service = UserService::new(user_repo, passwords, gateway.clone(), mailer, base_url);
//! ```

pub mod auth;
pub mod users;
pub mod books;
pub mod reviews;
pub mod mail;
