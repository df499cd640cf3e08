//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! MongoDB를 주 저장소로 사용하고 Redis를 캐시와 토큰 폐기 레지스트리로 사용합니다.
//! 각 리포지토리는 `main`에서 연결 핸들을 받아 명시적으로 생성됩니다.
//!
//! # Features
//!
//! - 사용자 조회 결과의 Redis read-through 캐시
//! - `blocklist:{jti}` 키 기반 토큰 폐기 레지스트리
//! - 책/리뷰 문서의 최신 순 조회
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let user_repo = UserRepository::new(database.clone(), redis.clone());
//! let user = user_repo.find_user_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod tokens;
pub mod books;
pub mod reviews;
