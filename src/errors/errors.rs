//! # 애플리케이션 에러 정의
//!
//! 서비스 전역에서 사용하는 [`AppError`]와 HTTP 응답 변환 규칙을 정의합니다.
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하기만 하면
//! 상태 코드와 JSON 본문이 자동으로 만들어집니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "invalid_token", "message": "Invalid token" }
//! ```
//!
//! 만료된 토큰과 폐기된 토큰은 같은 코드와 메시지로 응답합니다.
//! 클라이언트가 토큰이 블랙리스트에 올라갔는지 여부를 알 수 없어야 하기 때문입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AppError;
//!
//! async fn find_book(id: &str) -> Result<Book, AppError> {
//!     repo.find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("책을 찾을 수 없습니다".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 인증 코어의 에러 분류(`InvalidToken`, `TokenExpired`, `RevokedToken`,
/// `UserNotFound`, `InvalidCredentials`, `InsufficientPermissions`, `UserAlreadyExists`)와
/// 인프라 에러를 함께 포괄합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 서명 불일치, 손상된 페이로드, 잘못된 토큰 종류 (401)
    #[error("Invalid token")]
    InvalidToken,

    /// 만료 시각이 지난 세션 토큰 (401)
    #[error("Token expired")]
    TokenExpired,

    /// 폐기 레지스트리에 등록된 세션 토큰 (401)
    #[error("Token revoked")]
    RevokedToken,

    /// Authorization 헤더 누락 등 인증 정보 자체가 없는 경우 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 이메일 또는 비밀번호 불일치 (401)
    ///
    /// 어느 쪽이 틀렸는지 구분하지 않습니다.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 토큰은 유효하지만 사용자가 존재하지 않음 (404)
    #[error("User not found")]
    UserNotFound,

    /// 역할 부족 (403)
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// 이메일/사용자명 중복 (409)
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// 폐기 레지스트리(Redis)에 접근할 수 없음 (503)
    #[error("Revocation store unavailable: {0}")]
    RevocationStoreUnavailable(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 노출되는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidToken => "invalid_token",
            AppError::TokenExpired | AppError::RevokedToken => "token_expired_or_revoked",
            AppError::AuthenticationError(_) => "authentication_required",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::UserNotFound => "user_not_found",
            AppError::InsufficientPermissions => "insufficient_permissions",
            AppError::UserAlreadyExists(_) => "user_already_exists",
            AppError::RevocationStoreUnavailable(_) => "service_unavailable",
            AppError::DatabaseError(_) => "database_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::ExternalServiceError(_) => "external_service_error",
            AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에게 노출되는 메시지
    ///
    /// 만료와 폐기는 동일한 메시지를 사용합니다.
    pub fn client_message(&self) -> String {
        match self {
            AppError::TokenExpired | AppError::RevokedToken => {
                "Token is expired or has been revoked".to_string()
            }
            AppError::RevocationStoreUnavailable(_) => {
                "Authentication backend is temporarily unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::RevokedToken
            | AppError::AuthenticationError(_)
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AppError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RevocationStoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.code(),
                "message": self.client_message()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
