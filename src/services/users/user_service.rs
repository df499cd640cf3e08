//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 로그인, 이메일 인증, 비밀번호 재설정, 관리자용 사용자 관리를 담당합니다.
//! 토큰 발급과 검증은 모두 [`AuthGateway`]를 통해 이루어집니다.
//!
//! ## 흐름
//!
//! ```text
//! signup ──► hash ──► save ──► 인증 토큰 발급 ──► 메일 (실패 시 로그만)
//! login  ──► find_by_email ──► verify ──► 토큰 쌍 발급
//! verify ──► 액션 토큰 검증 ──► is_verified = true ──► 토큰 사용 처리
//! reset  ──► 액션 토큰 검증 ──► 새 해시 저장 ──► 토큰 사용 처리
//! ```
//!
//! ## 보안
//!
//! - 존재하지 않는 이메일과 틀린 비밀번호는 같은 `InvalidCredentials`로 응답합니다.
//! - 비밀번호 재설정 요청은 계정 존재 여부와 관계없이 성공으로 응답합니다.
//! - 이메일 인증 토큰과 비밀번호 재설정 토큰은 서로 다른 키로 서명되며, 한 번만 사용할 수 있습니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::{
    domain::{
        dto::users::{
            request::{CreateUserRequest, LoginRequest},
            response::{LoginResponse, UserResponse},
        },
        entities::users::{User, UserRole},
        models::token::ActionPurpose,
    },
    repositories::users::UserStore,
    services::{
        auth::{AuthGateway, PasswordService},
        mail::{EmailMessage, Mailer},
    },
};
use crate::errors::errors::AppError;

/// 회원가입 결과
///
/// 인증 토큰은 메일로만 전달되며 HTTP 응답에는 포함되지 않습니다.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub user: User,
    pub verification_token: String,
}

/// 사용자 관리 서비스
pub struct UserService {
    users: Arc<dyn UserStore>,

    passwords: Arc<PasswordService>,

    gateway: Arc<AuthGateway>,

    mailer: Arc<dyn Mailer>,

    /// 메일 링크에 사용하는 공개 URL (끝의 `/` 제외)
    base_url: String,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        passwords: Arc<PasswordService>,
        gateway: Arc<AuthGateway>,
        mailer: Arc<dyn Mailer>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            passwords,
            gateway,
            mailer,
            base_url: base_url.into(),
        }
    }

    /// 새 사용자 등록
    ///
    /// 미인증 상태의 `user` 역할 계정을 만들고 인증 메일을 보냅니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UserAlreadyExists` - 이메일 또는 사용자명 중복
    pub async fn register(&self, request: CreateUserRequest) -> Result<RegistrationOutcome, AppError> {
        let start_time = std::time::Instant::now();

        if self.users.find_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::UserAlreadyExists("이미 가입된 이메일입니다".to_string()));
        }
        if self.users.find_user_by_username(&request.username).await?.is_some() {
            return Err(AppError::UserAlreadyExists("이미 사용 중인 사용자명입니다".to_string()));
        }

        let password_hash = self.passwords.hash(&request.password)?;

        let user = User::new_local(
            request.username,
            request.email,
            request.first_name,
            request.last_name,
            password_hash,
        );
        let user = self.users.save_user(user).await?;

        let verification_token = self.gateway.issue_action_token(&user.email, ActionPurpose::VerifyEmail)?;
        let link = self.link("verify", &verification_token);

        self.send_quietly(EmailMessage {
            to: user.email.clone(),
            subject: "Verify your email".to_string(),
            html_body: format!(
                "<h1>Verify your email</h1><p>Please click this <a href=\"{}\">link</a> to verify your email.</p>",
                link
            ),
        })
        .await;

        log::info!("사용자 등록 완료 - 이메일: {}, 소요: {:?}", user.email, start_time.elapsed());

        Ok(RegistrationOutcome { user, verification_token })
    }

    /// 이메일/비밀번호 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidCredentials` - 이메일이 없거나 비밀번호가 틀림 (구분하지 않음)
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = match self.users.find_user_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                log::warn!("로그인 실패 (미가입 이메일): {}", request.email);
                return Err(AppError::InvalidCredentials);
            }
        };

        let verify_start = std::time::Instant::now();
        let is_valid = self.passwords.verify(&request.password, &user.password_hash);
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", request.email);
            return Err(AppError::InvalidCredentials);
        }

        let tokens = self.gateway.issue_session_pair(&user)?;
        log::info!("로그인 성공 - 사용자: {}", user.email);

        Ok(LoginResponse::new(user, tokens))
    }

    /// 이메일 인증 링크 처리
    ///
    /// 토큰은 한 번만 사용할 수 있으며 사용자 갱신 전에 선점됩니다.
    pub async fn verify_email(&self, token: &str) -> Result<User, AppError> {
        let claims = self.gateway.claim_action_token(token, ActionPurpose::VerifyEmail).await?;

        let mut user = self.users
            .find_user_by_email(&claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        user.is_verified = true;
        user.touch();
        let user = self.users.save_user(user).await?;

        log::info!("이메일 인증 완료 - 사용자: {}", user.email);

        Ok(user)
    }

    /// 비밀번호 재설정 메일 요청
    ///
    /// 가입된 이메일일 때만 메일을 보내지만 결과는 항상 성공입니다.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.users.find_user_by_email(email).await? else {
            log::info!("비밀번호 재설정 요청 (미가입 이메일): {}", email);
            return Ok(());
        };

        let token = self.gateway.issue_action_token(&user.email, ActionPurpose::ResetPassword)?;
        let link = self.link("password-reset-confirm", &token);

        self.send_quietly(EmailMessage {
            to: user.email.clone(),
            subject: "Reset your password".to_string(),
            html_body: format!(
                "<h1>Reset your password</h1><p>Please click this <a href=\"{}\">link</a> to reset your password.</p>",
                link
            ),
        })
        .await;

        Ok(())
    }

    /// 재설정 토큰으로 비밀번호를 변경합니다.
    ///
    /// 토큰은 저장 전에 선점되므로 같은 링크로 동시에 요청해도 한 번만 적용됩니다.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let claims = self.gateway.claim_action_token(token, ActionPurpose::ResetPassword).await?;

        let mut user = self.users
            .find_user_by_email(&claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        user.password_hash = self.passwords.hash(new_password)?;
        user.touch();
        let user = self.users.save_user(user).await?;

        log::info!("비밀번호 재설정 완료 - 사용자: {}", user.email);

        Ok(())
    }

    /// ID로 사용자 조회
    pub async fn get_user(&self, id: &str) -> Result<UserResponse, AppError> {
        self.find_existing(id).await.map(UserResponse::from)
    }

    /// 사용자 역할 변경 (관리자 전용)
    pub async fn update_role(&self, id: &str, role: UserRole) -> Result<UserResponse, AppError> {
        let mut user = self.find_existing(id).await?;

        user.role = role;
        user.touch();
        let user = self.users.save_user(user).await?;

        log::info!("사용자 역할 변경 - 사용자: {}, 역할: {}", user.email, role);
        Ok(UserResponse::from(user))
    }

    /// 사용자 삭제 (관리자 전용)
    ///
    /// 이미 발급된 토큰은 다음 요청에서 `UserNotFound`로 거부됩니다.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        if ObjectId::parse_str(id).is_err() {
            return Err(AppError::UserNotFound);
        }

        if self.users.delete_user(id).await? {
            log::info!("사용자 삭제 - ID: {}", id);
            Ok(())
        } else {
            Err(AppError::UserNotFound)
        }
    }

    async fn find_existing(&self, id: &str) -> Result<User, AppError> {
        if ObjectId::parse_str(id).is_err() {
            return Err(AppError::UserNotFound);
        }

        self.users.find_user_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    fn link(&self, path: &str, token: &str) -> String {
        format!("{}/api/v1/auth/{}/{}", self.base_url, path, urlencoding::encode(token))
    }

    async fn send_quietly(&self, message: EmailMessage) {
        let to = message.to.clone();
        if let Err(e) = self.mailer.send(message).await {
            log::error!("메일 발송 실패 - 수신자: {}, 에러: {}", to, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::token::TokenKind;
    use async_trait::async_trait;

    use crate::test_support::{AuthFixture, InMemoryUserStore, RecordingMailer};

    struct Harness {
        fixture: AuthFixture,
        mailer: Arc<RecordingMailer>,
        service: UserService,
    }

    fn harness() -> Harness {
        let fixture = AuthFixture::new();
        let mailer = Arc::new(RecordingMailer::default());
        let service = UserService::new(
            fixture.users.clone(),
            AuthFixture::passwords(),
            fixture.gateway.clone(),
            mailer.clone(),
            "http://books.test",
        );

        Harness { fixture, mailer, service }
    }

    fn signup(email: &str, username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Reader".to_string(),
            password: "password123".to_string(),
        }
    }

    fn tamper(token: &str) -> String {
        let mut chars: Vec<char> = token.chars().collect();
        let index = chars.len() - 2;
        chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }

    #[actix_web::test]
    async fn test_register_issues_token_that_recovers_email() {
        let h = harness();

        let outcome = h.service.register(signup("reader@example.com", "reader")).await.unwrap();

        let claims = h.fixture
            .tokens
            .decode_action_token(&outcome.verification_token, ActionPurpose::VerifyEmail)
            .unwrap();
        assert_eq!(claims.sub, "reader@example.com");

        let tampered = h.fixture
            .tokens
            .decode_action_token(&tamper(&outcome.verification_token), ActionPurpose::VerifyEmail);
        assert!(matches!(tampered, Err(AppError::InvalidToken)));
    }

    #[actix_web::test]
    async fn test_register_creates_unverified_user_and_sends_mail() {
        let h = harness();

        let outcome = h.service.register(signup("reader@example.com", "reader")).await.unwrap();

        assert!(!outcome.user.is_verified);
        assert_eq!(outcome.user.role, UserRole::User);
        assert_ne!(outcome.user.password_hash, "password123");

        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "reader@example.com");
        assert!(sent[0].html_body.contains("http://books.test/api/v1/auth/verify/"));
    }

    #[actix_web::test]
    async fn test_register_duplicate_email() {
        let h = harness();
        h.service.register(signup("reader@example.com", "reader")).await.unwrap();

        let result = h.service.register(signup("reader@example.com", "another")).await;

        assert!(matches!(result, Err(AppError::UserAlreadyExists(_))));
    }

    #[actix_web::test]
    async fn test_login_token_role_matches_stored_role() {
        let h = harness();
        let outcome = h.service.register(signup("admin@example.com", "admin")).await.unwrap();
        h.service
            .update_role(&outcome.user.id_string().unwrap(), UserRole::Admin)
            .await
            .unwrap();

        let response = h.service
            .login(LoginRequest {
                email: "admin@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        let claims = h.fixture.tokens.decode_session_token(&response.access_token).unwrap();
        assert_eq!(claims.user.role, UserRole::Admin);
        assert_eq!(claims.kind(), TokenKind::Access);
        assert_eq!(response.token_type, "Bearer");
    }

    #[actix_web::test]
    async fn test_login_failures_are_indistinguishable() {
        let h = harness();
        h.service.register(signup("reader@example.com", "reader")).await.unwrap();

        let wrong_password = h.service
            .login(LoginRequest {
                email: "reader@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        let unknown_email = h.service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
    }

    #[actix_web::test]
    async fn test_verify_email_is_single_use() {
        let h = harness();
        let outcome = h.service.register(signup("reader@example.com", "reader")).await.unwrap();

        let user = h.service.verify_email(&outcome.verification_token).await.unwrap();
        assert!(user.is_verified);

        let again = h.service.verify_email(&outcome.verification_token).await;
        assert!(matches!(again, Err(AppError::InvalidToken)));
    }

    #[actix_web::test]
    async fn test_verification_token_cannot_reset_password() {
        let h = harness();
        let outcome = h.service.register(signup("reader@example.com", "reader")).await.unwrap();

        let result = h.service.reset_password(&outcome.verification_token, "newpass").await;

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[actix_web::test]
    async fn test_password_reset_flow() {
        let h = harness();
        h.service.register(signup("reader@example.com", "reader")).await.unwrap();
        h.service.request_password_reset("reader@example.com").await.unwrap();

        let token = h.fixture
            .gateway
            .issue_action_token("reader@example.com", ActionPurpose::ResetPassword)
            .unwrap();
        h.service.reset_password(&token, "brand-new").await.unwrap();

        let login = h.service
            .login(LoginRequest {
                email: "reader@example.com".to_string(),
                password: "brand-new".to_string(),
            })
            .await;
        assert!(login.is_ok());
        assert!(h.mailer.sent()[1].html_body.contains("/api/v1/auth/password-reset-confirm/"));
    }

    /// 저장 도중 다른 작업에 실행을 양보하는 사용자 저장소
    struct YieldingUserStore {
        inner: Arc<InMemoryUserStore>,
    }

    #[async_trait]
    impl UserStore for YieldingUserStore {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
            actix_web::rt::task::yield_now().await;
            self.inner.find_user_by_email(email).await
        }

        async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
            self.inner.find_user_by_id(id).await
        }

        async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
            self.inner.find_user_by_username(username).await
        }

        async fn save_user(&self, user: User) -> Result<User, AppError> {
            actix_web::rt::task::yield_now().await;
            self.inner.save_user(user).await
        }

        async fn delete_user(&self, id: &str) -> Result<bool, AppError> {
            self.inner.delete_user(id).await
        }
    }

    #[actix_web::test]
    async fn test_concurrent_password_resets_apply_once() {
        let h = harness();
        h.service.register(signup("reader@example.com", "reader")).await.unwrap();

        let service = UserService::new(
            Arc::new(YieldingUserStore { inner: h.fixture.users.clone() }),
            AuthFixture::passwords(),
            h.fixture.gateway.clone(),
            h.mailer.clone(),
            "http://books.test",
        );
        let token = h.fixture
            .gateway
            .issue_action_token("reader@example.com", ActionPurpose::ResetPassword)
            .unwrap();

        let (first, second) = futures_util::future::join(
            service.reset_password(&token, "first-pass"),
            service.reset_password(&token, "second-pass"),
        )
        .await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(AppError::InvalidToken)));

        let credentials = |password: &str| LoginRequest {
            email: "reader@example.com".to_string(),
            password: password.to_string(),
        };
        assert!(h.service.login(credentials("first-pass")).await.is_ok());
        assert!(matches!(
            h.service.login(credentials("second-pass")).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[actix_web::test]
    async fn test_password_reset_request_for_unknown_email_succeeds_silently() {
        let h = harness();

        assert!(h.service.request_password_reset("nobody@example.com").await.is_ok());
        assert!(h.mailer.sent().is_empty());
    }

    #[actix_web::test]
    async fn test_admin_user_management() {
        let h = harness();
        let outcome = h.service.register(signup("reader@example.com", "reader")).await.unwrap();
        let id = outcome.user.id_string().unwrap();

        assert_eq!(h.service.get_user(&id).await.unwrap().email, "reader@example.com");

        h.service.delete_user(&id).await.unwrap();

        assert!(matches!(h.service.get_user(&id).await, Err(AppError::UserNotFound)));
        assert!(matches!(h.service.delete_user(&id).await, Err(AppError::UserNotFound)));
        assert!(matches!(h.service.get_user("not-an-id").await, Err(AppError::UserNotFound)));
    }
}
