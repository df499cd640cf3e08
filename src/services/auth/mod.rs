//! 인증 및 보안 서비스 모듈
//!
//! 비밀번호 해싱, JWT 토큰 발급/검증, 요청 인증 게이트웨이를 제공합니다.
//!
//! # Features
//!
//! - bcrypt 비밀번호 해싱
//! - JWT 액세스/리프레시 토큰 관리
//! - 이메일 인증/비밀번호 재설정용 액션 토큰
//! - 블록리스트 기반 로그아웃과 역할 기반 권한 검사
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthGateway, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(AuthSettings::from_env()));
//! let gateway = AuthGateway::new(tokens, blocklist, user_repo);
//! let claims = gateway.authenticate(token, false).await?;
//! ```

pub mod password_service;
pub mod token_service;
pub mod auth_gateway;

pub use password_service::PasswordService;
pub use token_service::TokenService;
pub use auth_gateway::AuthGateway;
