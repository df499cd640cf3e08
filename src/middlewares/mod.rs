//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인에서 사용되는 인증 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증 (서명, 종류, 만료, 블록리스트)
//! - 저장소에서 현재 사용자 조회
//! - 역할 기반 접근 제어
//! - 사용자 정보를 request extension에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/api/v1/users")
//!     .wrap(AuthMiddleware::admin_only())
//!     .route("/{user_uid}", web::get().to(get_user));
//! ```
//!
//! 미들웨어는 `web::Data<AuthGateway>`가 앱에 등록되어 있어야 동작합니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
