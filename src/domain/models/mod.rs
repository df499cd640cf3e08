//! # Domain Models Module
//!
//! 저장되지 않는 도메인 모델을 정의합니다.
//!
//! - [`token`] - 세션/액션 토큰 클레임
//! - [`auth`] - 인증된 요청 컨텍스트와 역할 요구사항

pub mod auth;
pub mod token;
