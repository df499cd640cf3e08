use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{User, UserRole};
use crate::domain::models::token::SessionClaims;

/// 인증 미들웨어를 통과한 요청의 사용자 정보
///
/// 역할은 토큰이 아니라 저장소에서 방금 조회한 사용자 문서의 값입니다.
/// 토큰 발급 후 역할이 바뀌었다면 바뀐 역할이 적용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (ObjectId 16진수)
    pub user_uid: String,

    pub email: String,

    pub role: UserRole,

    /// 요청에 사용된 액세스 토큰의 JTI
    pub jti: String,

    /// 액세스 토큰 만료 시각 (Unix 초)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn new(user: &User, claims: &SessionClaims) -> Self {
        Self {
            user_uid: user.id_string().unwrap_or_else(|| claims.user.user_uid.clone()),
            email: user.email.clone(),
            role: user.role,
            jti: claims.jti.clone(),
            expires_at: claims.exp,
        }
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 리소스 소유자이거나 관리자인지 확인
    pub fn can_modify(&self, owner_uid: &str) -> bool {
        self.is_admin() || self.user_uid == owner_uid
    }
}

/// 핸들러 인자로 `AuthenticatedUser`를 받을 수 있게 합니다.
///
/// 미들웨어가 요청 확장에 넣어 둔 값을 꺼내며, 없으면 401을 반환합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_uid: "owner".to_string(),
            email: "owner@example.com".to_string(),
            role,
            jti: "jti".to_string(),
            expires_at: 0,
        }
    }

    #[test]
    fn test_owner_can_modify() {
        assert!(user(UserRole::User).can_modify("owner"));
        assert!(!user(UserRole::User).can_modify("someone-else"));
    }

    #[test]
    fn test_admin_can_modify_anything() {
        let admin = user(UserRole::Admin);

        assert!(admin.is_admin());
        assert!(admin.can_modify("someone-else"));
    }
}
