//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 요청/응답 본문 타입을 정의합니다.
//! 요청 DTO는 `validator`로 입력값을 검증하고,
//! 응답 DTO는 엔티티에서 내부 필드를 제외하고 변환됩니다.

pub mod users;
pub mod tokens;
pub mod books;
pub mod reviews;
