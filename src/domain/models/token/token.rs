//! 토큰 클레임 모델
//!
//! 세션 토큰(액세스/리프레시)과 액션 토큰(이메일 인증/비밀번호 재설정)의
//! 페이로드 구조를 정의합니다. 두 토큰은 서로 다른 키로 서명되며
//! 한 쪽이 다른 쪽으로 해석되는 일은 없습니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{User, UserRole};

/// 세션 토큰에 포함되는 사용자 식별 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_uid: String,
    pub email: String,
    pub role: UserRole,
}

impl UserIdentity {
    /// 저장된 사용자에서 식별 정보를 만듭니다.
    ///
    /// 아직 저장되지 않아 ID가 없는 사용자는 `None`을 반환합니다.
    pub fn from_user(user: &User) -> Option<Self> {
        Some(Self {
            user_uid: user.id_string()?,
            email: user.email.clone(),
            role: user.role,
        })
    }
}

/// 세션 토큰 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn is_refresh(&self) -> bool {
        matches!(self, TokenKind::Refresh)
    }
}

/// 세션 토큰 클레임
///
/// `exp`, `iat`는 Unix 초 단위입니다. `refresh`가 참이면 리프레시 토큰입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user: UserIdentity,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    pub refresh: bool,
}

impl SessionClaims {
    pub fn kind(&self) -> TokenKind {
        if self.refresh {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }

    /// `now` 기준 남은 수명 (초). 이미 만료되었으면 0 이하입니다.
    pub fn remaining_seconds(&self, now: i64) -> i64 {
        self.exp - now
    }
}

/// 액션 토큰의 용도
///
/// 용도마다 서명 키가 다르므로 이메일 인증 링크로 비밀번호를 재설정할 수 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPurpose {
    VerifyEmail,
    ResetPassword,
}

impl ActionPurpose {
    /// 서명 키 유도에 사용하는 솔트
    pub fn salt(&self) -> &'static str {
        match self {
            ActionPurpose::VerifyEmail => "email-verification",
            ActionPurpose::ResetPassword => "password-reset",
        }
    }
}

/// 액션 토큰 클레임
///
/// 만료 시각을 담지 않고 `iat`와 서버의 최대 유효 기간으로 유효성을 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionClaims {
    /// 단일 페이로드 (이메일 주소)
    pub sub: String,
    pub purpose: ActionPurpose,
    pub iat: i64,
    pub jti: String,
}

/// 로그인 시 발급되는 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
}

/// 리프레시로 재발급된 액세스 토큰
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshedAccess {
    pub access_token: String,
    pub expires_in: i64,
}
