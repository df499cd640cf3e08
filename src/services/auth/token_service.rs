//! JWT 토큰 관리 서비스 구현
//!
//! 두 종류의 서명 토큰을 다룹니다.
//!
//! - **세션 토큰**: 액세스/리프레시 토큰. 사용자 식별 정보, JTI, 만료 시각, 리프레시 플래그를 담습니다.
//! - **액션 토큰**: 이메일 인증/비밀번호 재설정 링크. 단일 페이로드와 발급 시각만 담으며
//!   서버의 최대 유효 기간으로 만료를 판단합니다.
//!
//! 액션 토큰은 용도별 솔트로 유도한 별도 키로 서명되므로 세션 토큰과 서로 교차 사용할 수 없습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::AuthSettings;
use crate::domain::models::token::{
    ActionClaims, ActionPurpose, SessionClaims, TokenKind, TokenPair, UserIdentity,
};
use crate::errors::errors::{AppError, ErrorContext};

/// 용도별 액션 토큰 키
struct ActionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl ActionKeys {
    /// `SHA-256("{salt}:{secret}")`를 HMAC 키로 사용합니다.
    fn derive(secret: &str, purpose: ActionPurpose) -> Self {
        let digest = Sha256::digest(format!("{}:{}", purpose.salt(), secret).as_bytes());

        Self {
            encoding: EncodingKey::from_secret(&digest),
            decoding: DecodingKey::from_secret(&digest),
        }
    }
}

/// JWT 토큰 관리 서비스
///
/// 서명 키는 생성 시 한 번만 만들어 두고 요청마다 재사용합니다.
pub struct TokenService {
    settings: AuthSettings,

    session_encoding: EncodingKey,

    session_decoding: DecodingKey,

    verify_email_keys: ActionKeys,

    reset_password_keys: ActionKeys,
}

impl TokenService {
    pub fn new(settings: AuthSettings) -> Self {
        let secret = settings.jwt_secret.as_bytes();

        Self {
            session_encoding: EncodingKey::from_secret(secret),
            session_decoding: DecodingKey::from_secret(secret),
            verify_email_keys: ActionKeys::derive(&settings.jwt_secret, ActionPurpose::VerifyEmail),
            reset_password_keys: ActionKeys::derive(&settings.jwt_secret, ActionPurpose::ResetPassword),
            settings,
        }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// 액세스 토큰 수명 (초)
    pub fn access_ttl_seconds(&self) -> i64 {
        self.settings.access_token_ttl.num_seconds()
    }

    fn action_keys(&self, purpose: ActionPurpose) -> &ActionKeys {
        match purpose {
            ActionPurpose::VerifyEmail => &self.verify_email_keys,
            ActionPurpose::ResetPassword => &self.reset_password_keys,
        }
    }

    /// 세션 토큰을 발급합니다.
    ///
    /// 매 발급마다 새 JTI(UUID v4)를 생성하며 만료 시각은 `now + ttl`입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue_session_token(
        &self,
        identity: &UserIdentity,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = SessionClaims {
            user: identity.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            refresh: kind.is_refresh(),
        };

        encode(&Header::new(self.settings.jwt_algorithm), &claims, &self.session_encoding)
            .with_context(|| format!("{:?} 토큰 생성 실패", kind))
    }

    /// 기본 수명의 액세스 토큰을 발급합니다.
    pub fn issue_access_token(&self, identity: &UserIdentity) -> Result<String, AppError> {
        self.issue_session_token(identity, TokenKind::Access, self.settings.access_token_ttl)
    }

    /// 기본 수명의 리프레시 토큰을 발급합니다.
    pub fn issue_refresh_token(&self, identity: &UserIdentity) -> Result<String, AppError> {
        self.issue_session_token(identity, TokenKind::Refresh, self.settings.refresh_token_ttl)
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = token_service.issue_token_pair(&identity)?;
    /// println!("Expires in: {} seconds", pair.expires_in);
    /// ```
    pub fn issue_token_pair(&self, identity: &UserIdentity) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(identity)?,
            refresh_token: self.issue_refresh_token(identity)?,
            expires_in: self.access_ttl_seconds(),
        })
    }

    /// 세션 토큰의 서명과 구조를 검증하고 클레임을 꺼냅니다.
    ///
    /// 만료 여부와 폐기 여부는 확인하지 않습니다. 호출 측(인증 게이트웨이)이 직접 확인해야 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 서명 불일치, 손상된 페이로드, 디코딩 실패
    pub fn decode_session_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::new(self.settings.jwt_algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        decode::<SessionClaims>(token, &self.session_decoding, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                log::debug!("세션 토큰 디코딩 실패: {}", e);
                AppError::InvalidToken
            })
    }

    /// 이메일 인증/비밀번호 재설정용 액션 토큰을 발급합니다.
    ///
    /// 결과는 URL 경로에 그대로 넣을 수 있는 base64url 문자열입니다.
    pub fn issue_action_token(&self, payload: &str, purpose: ActionPurpose) -> Result<String, AppError> {
        let claims = ActionClaims {
            sub: payload.to_string(),
            purpose,
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        self.sign_action_claims(&claims)
    }

    pub(crate) fn sign_action_claims(&self, claims: &ActionClaims) -> Result<String, AppError> {
        encode(
            &Header::new(self.settings.jwt_algorithm),
            claims,
            &self.action_keys(claims.purpose).encoding,
        )
        .context("액션 토큰 생성 실패")
    }

    /// 액션 토큰을 검증하고 클레임을 꺼냅니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 서명 불일치, 다른 용도의 토큰, 최대 유효 기간 초과
    pub fn decode_action_token(&self, token: &str, purpose: ActionPurpose) -> Result<ActionClaims, AppError> {
        let mut validation = Validation::new(self.settings.jwt_algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<ActionClaims>(token, &self.action_keys(purpose).decoding, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                log::debug!("액션 토큰 디코딩 실패: {}", e);
                AppError::InvalidToken
            })?;

        if claims.purpose != purpose {
            return Err(AppError::InvalidToken);
        }

        let age = Utc::now().timestamp() - claims.iat;
        if age > self.settings.action_token_max_age.num_seconds() {
            log::debug!("액션 토큰 유효 기간 초과 - JTI: {}, 경과: {}초", claims.jti, age);
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식 또는 빈 토큰
    pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }
}
