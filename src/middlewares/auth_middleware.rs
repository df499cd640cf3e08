use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// Bearer 액세스 토큰 인증 미들웨어
///
/// 인증에 성공하면 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를
/// 요청 확장에 넣고, 실패하면 해당 `AppError` 응답으로 즉시 종료합니다.
pub struct AuthMiddleware {
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 로그인한 사용자라면 역할과 관계없이 통과
    pub fn required() -> Self {
        Self { required_role: None }
    }

    /// 주어진 역할 중 하나가 있어야 통과
    pub fn required_with_roles(roles: Vec<UserRole>) -> Self {
        Self {
            required_role: Some(RequiredRole::Any(roles)),
        }
    }

    pub fn admin_only() -> Self {
        Self {
            required_role: Some(RequiredRole::Single(UserRole::Admin)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use super::*;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::domain::models::token::{TokenKind, UserIdentity};
    use crate::services::auth::AuthGateway;
    use crate::test_support::AuthFixture;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "email": user.email, "role": user.role }))
    }

    macro_rules! app {
        ($fixture:expr, $middleware:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::<AuthGateway>::from($fixture.gateway.clone()))
                    .service(
                        web::scope("/protected")
                            .wrap($middleware)
                            .route("", web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    async fn error_code<B: actix_web::body::MessageBody>(response: ServiceResponse<B>) -> String {
        let body: serde_json::Value = test::read_body_json(response).await;
        body["error"].as_str().unwrap_or_default().to_string()
    }

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized() {
        let fixture = AuthFixture::new();
        let app = app!(fixture, AuthMiddleware::required());

        let response = test::call_service(&app, test::TestRequest::get().uri("/protected").to_request()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let fixture = AuthFixture::new();
        let user = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let pair = fixture.gateway.issue_session_pair(&user).unwrap();
        let app = app!(fixture, AuthMiddleware::required());

        let request = test::TestRequest::get()
            .uri("/protected")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["email"], "reader@example.com");
        assert_eq!(body["role"], "user");
    }

    #[actix_web::test]
    async fn test_refresh_token_is_rejected_as_bearer() {
        let fixture = AuthFixture::new();
        let user = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let pair = fixture.gateway.issue_session_pair(&user).unwrap();
        let app = app!(fixture, AuthMiddleware::required());

        let request = test::TestRequest::get()
            .uri("/protected")
            .insert_header(bearer(&pair.refresh_token))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "invalid_token");
    }

    #[actix_web::test]
    async fn test_expired_and_revoked_look_the_same() {
        let fixture = AuthFixture::new();
        let user = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let identity = UserIdentity::from_user(&user).unwrap();
        let expired = fixture
            .tokens
            .issue_session_token(&identity, TokenKind::Access, chrono::Duration::seconds(-5))
            .unwrap();
        let revoked = fixture.tokens.issue_access_token(&identity).unwrap();
        fixture.gateway.logout(&revoked, None).await.unwrap();
        let app = app!(fixture, AuthMiddleware::required());

        let mut bodies = Vec::new();
        for token in [&expired, &revoked] {
            let request = test::TestRequest::get()
                .uri("/protected")
                .insert_header(bearer(token))
                .to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(test::read_body(response).await);
        }

        assert_eq!(bodies[0], bodies[1]);
    }

    #[actix_web::test]
    async fn test_admin_only_rejects_regular_user() {
        let fixture = AuthFixture::new();
        let user = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let pair = fixture.gateway.issue_session_pair(&user).unwrap();
        let app = app!(fixture, AuthMiddleware::admin_only());

        let request = test::TestRequest::get()
            .uri("/protected")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_role_comes_from_store_not_token() {
        let fixture = AuthFixture::new();
        let mut user = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let pair = fixture.gateway.issue_session_pair(&user).unwrap();
        user.role = UserRole::Admin;
        fixture.users.insert(user);
        let app = app!(fixture, AuthMiddleware::required_with_roles(vec![UserRole::Admin]));

        let request = test::TestRequest::get()
            .uri("/protected")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_deleted_user_is_not_found() {
        let fixture = AuthFixture::new();
        let user = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let pair = fixture.gateway.issue_session_pair(&user).unwrap();
        {
            use crate::repositories::users::UserStore;
            fixture.users.delete_user(&user.id_string().unwrap()).await.unwrap();
        }
        let app = app!(fixture, AuthMiddleware::required());

        let request = test::TestRequest::get()
            .uri("/protected")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unreachable_blocklist_is_service_unavailable() {
        let fixture = AuthFixture::new();
        let user = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let pair = fixture.gateway.issue_session_pair(&user).unwrap();
        fixture.revocations.set_unavailable(true);
        let app = app!(fixture, AuthMiddleware::required());

        let request = test::TestRequest::get()
            .uri("/protected")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
