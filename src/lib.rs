//! 북 리뷰 서비스 백엔드
//!
//! 책과 리뷰를 관리하는 REST API 서비스입니다. 핵심은 인증/세션 계층으로,
//! JWT 액세스/리프레시 토큰, Redis 블록리스트 기반 로그아웃, 역할 기반 인가,
//! 이메일 인증과 비밀번호 재설정을 위한 일회용 액션 토큰을 제공합니다.
//!
//! # Features
//!
//! - **계정 관리**: 회원가입, 이메일 인증, 비밀번호 재설정, 관리자용 역할 변경
//! - **JWT 인증**: 액세스/리프레시 토큰 기반 상태 없는 인증
//! - **토큰 폐기**: Redis 블록리스트 (TTL = 토큰의 남은 수명)
//! - **명시적 DI**: `main`에서 조립해 `web::Data`로 주입
//! - **MongoDB**: 사용자/책/리뷰 영구 저장
//! - **Redis**: 사용자 캐시와 블록리스트
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use book_review_service::services::auth::{AuthGateway, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(AuthSettings::from_env()));
//! let gateway = AuthGateway::new(tokens, blocklist, user_repo);
//!
//! let claims = gateway.authenticate(access_token, false).await?;
//! let user = gateway.current_user(&claims).await?;
//! gateway.authorize(&user, &[UserRole::Admin])?;
//! ```

pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

#[cfg(test)]
mod test_support;
