//! # Authentication HTTP Handlers
//!
//! `/api/v1/auth` 스코프의 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 | 인증 |
//! |--------|------|------|------|
//! | `POST` | `/signup` | 회원가입 + 인증 메일 | - |
//! | `POST` | `/login` | 토큰 쌍 발급 | - |
//! | `GET` | `/refresh_token` | 액세스 토큰 재발급 | Bearer 리프레시 토큰 |
//! | `POST` | `/refresh` | 액세스 토큰 재발급 | 헤더, 쿠키 또는 본문의 리프레시 토큰 |
//! | `POST` | `/logout` | 토큰 폐기 | Bearer 액세스 토큰 |
//! | `GET` | `/me` | 현재 사용자 | Bearer 액세스 토큰 |
//! | `GET` | `/verify/{token}` | 이메일 인증 | - |
//! | `POST` | `/password-reset-request` | 재설정 메일 요청 | - |
//! | `POST` | `/password-reset-confirm/{token}` | 비밀번호 재설정 | - |

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::domain::dto::tokens::{AccessTokenResponse, MessageResponse, LogoutRequest, RefreshTokenRequest};
use crate::domain::dto::users::{
    CreateUserRequest, CreateUserResponse, LoginRequest, PasswordResetConfirmRequest,
    PasswordResetRequest, UserResponse,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::repositories::users::UserStore;
use crate::services::auth::{AuthGateway, TokenService};
use crate::services::users::UserService;

const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Authorization 헤더의 Bearer 토큰
fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    TokenService::extract_bearer_token(auth_header)
}

/// 회원가입
///
/// 미인증 계정을 만들고 인증 메일을 보냅니다. 인증 토큰은 응답에 포함되지 않습니다.
#[post("/signup")]
pub async fn signup(
    users: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = users.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(CreateUserResponse {
        message: "Account created! Check your email to verify your account".to_string(),
        user: UserResponse::from(outcome.user),
    }))
}

#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = users.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Bearer 리프레시 토큰으로 액세스 토큰 재발급
#[get("/refresh_token")]
pub async fn refresh_token(
    req: HttpRequest,
    gateway: web::Data<AuthGateway>,
) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;
    let refreshed = gateway.refresh(token).await?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse::from(refreshed)))
}

/// 리프레시 토큰을 헤더, `refresh_token` 쿠키, 요청 본문 순서로 찾습니다.
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    gateway: web::Data<AuthGateway>,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let token = match bearer_token(&req) {
        Ok(token) => token.to_string(),
        Err(_) => req
            .cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| payload.map(|body| body.into_inner().refresh_token))
            .ok_or_else(|| AppError::AuthenticationError("리프레시 토큰이 없습니다".to_string()))?,
    };

    let refreshed = gateway.refresh(&token).await?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse::from(refreshed)))
}

/// 액세스 토큰(과 선택적으로 리프레시 토큰)을 폐기합니다.
#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    gateway: web::Data<AuthGateway>,
    payload: Option<web::Json<LogoutRequest>>,
) -> Result<HttpResponse, AppError> {
    let access_token = bearer_token(&req)?;
    let body = payload.map(|p| p.into_inner()).unwrap_or_default();

    gateway.logout(access_token, body.refresh_token.as_deref()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")))
}

#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn me(
    user: AuthenticatedUser,
    users: web::Data<dyn UserStore>,
) -> Result<HttpResponse, AppError> {
    let user = users
        .find_user_by_id(&user.user_uid)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[get("/verify/{token}")]
pub async fn verify_email(
    users: web::Data<UserService>,
    token: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    users.verify_email(&token).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Account verified successfully")))
}

/// 계정 존재 여부와 관계없이 같은 응답을 돌려줍니다.
#[post("/password-reset-request")]
pub async fn password_reset_request(
    users: web::Data<UserService>,
    payload: web::Json<PasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    users.request_password_reset(&payload.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Please check your email for instructions to reset your password",
    )))
}

#[post("/password-reset-confirm/{token}")]
pub async fn password_reset_confirm(
    users: web::Data<UserService>,
    token: web::Path<String>,
    payload: web::Json<PasswordResetConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    users.reset_password(&token, &payload.new_password).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successfully")))
}
