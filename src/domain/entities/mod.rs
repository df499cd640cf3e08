//! # Domain Entities Module
//!
//! MongoDB에 영구 저장되는 문서 타입들을 정의합니다.
//!
//! - [`users`] - 사용자 계정과 역할
//! - [`books`] - 사용자가 등록한 책
//! - [`reviews`] - 책에 대한 리뷰

pub mod users;
pub mod books;
pub mod reviews;
