//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};
use crate::errors::errors::AppError;
use crate::services::auth::{AuthGateway, TokenService};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            match authenticate_request(&req, required_role.as_ref()).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {} ({})", user.user_uid, user.role);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    log::warn!("인증 실패 [{}]: {} {}", err.code(), req.method(), req.path());
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 헤더 추출, 토큰 인증, 사용자 조회, 역할 검사를 차례로 수행합니다.
async fn authenticate_request(
    req: &ServiceRequest,
    required_role: Option<&RequiredRole>,
) -> Result<AuthenticatedUser, AppError> {
    let gateway = req
        .app_data::<web::Data<AuthGateway>>()
        .ok_or_else(|| AppError::InternalError("AuthGateway가 등록되지 않았습니다".to_string()))?;

    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = TokenService::extract_bearer_token(auth_header)?;

    let claims = gateway.authenticate(token, false).await?;
    let user = gateway.current_user(&claims).await?;

    let allowed: &[UserRole] = match required_role {
        Some(required) => required.allowed(),
        None => &[UserRole::User, UserRole::Admin],
    };
    gateway.authorize(&user, allowed)?;

    Ok(AuthenticatedUser::new(&user, &claims))
}
