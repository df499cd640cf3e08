//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 로그인, 이메일 인증, 비밀번호 재설정과 관리자용 사용자 관리를 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let outcome = user_service.register(request).await?;
//! let login = user_service.login(login_request).await?;
//! ```

pub mod user_service;

pub use user_service::{RegistrationOutcome, UserService};
