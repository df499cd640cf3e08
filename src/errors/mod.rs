//! 에러 처리 모듈
//!
//! [`errors::AppError`]를 중심으로 한 통합 에러 타입을 제공합니다.

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
