//! 인증 게이트웨이
//!
//! 토큰 서비스, 폐기 레지스트리, 사용자 저장소를 묶어 요청 단위의 인증/인가를 수행합니다.
//! 각 검사(디코딩, 종류, 만료, 폐기)는 독립적으로 평가되며 첫 실패에서 중단됩니다.
//!
//! # 세션 토큰 상태
//!
//! ```text
//! Issued -> Valid (now <= exp, 미폐기) -> Expired | Revoked
//! ```
//!
//! 두 종료 상태는 되돌릴 수 없으며 클라이언트에게는 같은 응답으로 보입니다.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::users::{User, UserRole};
use crate::domain::models::token::{
    ActionClaims, ActionPurpose, RefreshedAccess, SessionClaims, TokenPair, UserIdentity,
};
use crate::errors::errors::AppError;
use crate::repositories::tokens::{RevocationReason, RevocationStore};
use crate::repositories::users::UserStore;
use crate::services::auth::TokenService;

/// 요청 인증/인가 진입점
pub struct AuthGateway {
    tokens: Arc<TokenService>,

    revocations: Arc<dyn RevocationStore>,

    users: Arc<dyn UserStore>,
}

impl AuthGateway {
    pub fn new(
        tokens: Arc<TokenService>,
        revocations: Arc<dyn RevocationStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self { tokens, revocations, users }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// 세션 토큰을 인증하고 클레임을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 디코딩 실패 또는 토큰 종류 불일치
    /// * `AppError::TokenExpired` - `now > exp`
    /// * `AppError::RevokedToken` - 블록리스트에 등록된 JTI
    /// * `AppError::RevocationStoreUnavailable` - 블록리스트 조회 불가
    pub async fn authenticate(&self, raw_token: &str, require_refresh: bool) -> Result<SessionClaims, AppError> {
        let claims = self.tokens
            .decode_session_token(raw_token)
            .inspect_err(|_| log::warn!("인증 실패 [invalid_token] - 서명 또는 형식 오류"))?;

        if claims.refresh != require_refresh {
            log::warn!(
                "인증 실패 [token_kind_mismatch] - JTI: {}, 리프레시 요구: {}, 실제: {}",
                claims.jti, require_refresh, claims.refresh
            );
            return Err(AppError::InvalidToken);
        }

        if Utc::now().timestamp() > claims.exp {
            log::warn!("인증 실패 [token_expired] - JTI: {}", claims.jti);
            return Err(AppError::TokenExpired);
        }

        if self.revocations.is_revoked(&claims.jti).await? {
            log::warn!("인증 실패 [token_revoked] - JTI: {}", claims.jti);
            return Err(AppError::RevokedToken);
        }

        Ok(claims)
    }

    /// 토큰에 담긴 식별 정보로 사용자를 조회합니다.
    ///
    /// 토큰은 유효하지만 계정이 삭제된 경우 `UserNotFound`를 반환합니다.
    pub async fn current_user(&self, claims: &SessionClaims) -> Result<User, AppError> {
        match self.users.find_user_by_id(&claims.user.user_uid).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) | Err(AppError::ValidationError(_)) => {
                log::warn!("인증 실패 [user_not_found] - 사용자 ID: {}", claims.user.user_uid);
                Err(AppError::UserNotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// 역할이 허용 목록에 포함되는지 확인합니다.
    pub fn is_authorized(role: UserRole, allowed_roles: &[UserRole]) -> bool {
        allowed_roles.contains(&role)
    }

    /// 사용자 역할이 허용 목록에 없으면 `InsufficientPermissions`를 반환합니다.
    pub fn authorize(&self, user: &User, allowed_roles: &[UserRole]) -> Result<(), AppError> {
        if Self::is_authorized(user.role, allowed_roles) {
            Ok(())
        } else {
            log::warn!(
                "권한 부족 - 사용자: {}, 역할: {}, 허용: {:?}",
                user.email, user.role, allowed_roles
            );
            Err(AppError::InsufficientPermissions)
        }
    }

    /// 로그인 성공 시 토큰 쌍을 발급합니다.
    pub fn issue_session_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let identity = UserIdentity::from_user(user)
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        self.tokens.issue_token_pair(&identity)
    }

    /// 리프레시 토큰으로 새 액세스 토큰을 발급합니다.
    ///
    /// 액세스 토큰을 넘기면 `InvalidToken`으로 거부되며 어떤 토큰도 발급되지 않습니다.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AppError> {
        let claims = self.authenticate(refresh_token, true).await?;

        if Utc::now().timestamp() >= claims.exp {
            log::warn!("인증 실패 [token_expired] - JTI: {}", claims.jti);
            return Err(AppError::TokenExpired);
        }

        let access_token = self.tokens.issue_access_token(&claims.user)?;
        log::info!("액세스 토큰 재발급 - 사용자: {}", claims.user.email);

        Ok(RefreshedAccess {
            access_token,
            expires_in: self.tokens.access_ttl_seconds(),
        })
    }

    /// 액세스 토큰을 폐기합니다.
    ///
    /// 같은 사용자의 유효한 리프레시 토큰이 함께 주어지면 그것도 폐기합니다.
    /// 폐기 기간은 토큰의 남은 수명과 같거나 깁니다.
    pub async fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> Result<(), AppError> {
        let claims = self.authenticate(access_token, false).await?;
        self.revoke_session(&claims).await?;

        if let Some(refresh_token) = refresh_token {
            match self.authenticate(refresh_token, true).await {
                Ok(refresh_claims) if refresh_claims.user.user_uid == claims.user.user_uid => {
                    self.revoke_session(&refresh_claims).await?;
                }
                Ok(_) => log::warn!("다른 사용자의 리프레시 토큰으로 로그아웃 시도 - 사용자: {}", claims.user.email),
                Err(e @ AppError::RevocationStoreUnavailable(_)) => return Err(e),
                Err(e) => log::debug!("리프레시 토큰 폐기 건너뜀: {}", e),
            }
        }

        log::info!("로그아웃 - 사용자: {}", claims.user.email);
        Ok(())
    }

    async fn revoke_session(&self, claims: &SessionClaims) -> Result<(), AppError> {
        let ttl = claims.remaining_seconds(Utc::now().timestamp()).max(1) as u64;
        self.revocations.revoke(&claims.jti, ttl, RevocationReason::Logout).await
    }

    /// 액션 토큰을 발급합니다.
    pub fn issue_action_token(&self, payload: &str, purpose: ActionPurpose) -> Result<String, AppError> {
        self.tokens.issue_action_token(payload, purpose)
    }

    /// 액션 토큰을 검증하고 JTI를 선점합니다.
    ///
    /// 선점은 블록리스트에 원자적으로 기록되며, 같은 토큰으로 동시에 들어온 요청 중
    /// 하나만 성공합니다. 이후 작업이 실패해도 토큰은 다시 사용할 수 없습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 서명/용도/유효 기간 불일치 또는 이미 사용된 토큰
    /// * `AppError::RevocationStoreUnavailable` - 블록리스트 기록 불가
    pub async fn claim_action_token(&self, token: &str, purpose: ActionPurpose) -> Result<ActionClaims, AppError> {
        let claims = self.tokens
            .decode_action_token(token, purpose)
            .inspect_err(|_| log::warn!("인증 실패 [invalid_action_token] - 용도: {:?}", purpose))?;

        let max_age = self.tokens.settings().action_token_max_age.num_seconds();
        let elapsed = Utc::now().timestamp() - claims.iat;
        let ttl = (max_age - elapsed).max(1) as u64;

        let claimed = self.revocations
            .claim(&claims.jti, ttl, RevocationReason::ActionConsumed)
            .await?;

        if !claimed {
            log::warn!("인증 실패 [action_token_reused] - JTI: {}, 용도: {:?}", claims.jti, purpose);
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }
}
