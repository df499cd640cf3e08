//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 `web::Data`로 주입된 서비스를 호출하고 `Result<HttpResponse, AppError>`를 반환합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - Bearer 토큰 인증, 역할 검사
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 회원가입, 로그인, 토큰 재발급, 로그아웃, 이메일 인증, 비밀번호 재설정
//! - **`books`**: 책 CRUD
//! - **`reviews`**: 리뷰 작성/조회/삭제
//! - **`users`**: 관리자용 사용자 관리
//!
//! ## 에러 처리
//!
//! 입력 검증은 `validator`로 수행하고 실패 시 `AppError::ValidationError`(400)를 반환합니다.
//! 나머지 에러는 `?`로 전파되어 `AppError`의 `ResponseError` 구현이 응답을 만듭니다.

pub mod auth;
pub mod books;
pub mod reviews;
pub mod users;
