//! # Authentication Configuration Module
//!
//! JWT 서명 키, 알고리즘, 토큰 수명 등 인증 관련 설정을 관리합니다.
//!
//! 환경 변수는 [`JwtConfig`]의 정적 접근자로 읽고,
//! 실행 중에는 이를 한 번 모아 둔 [`AuthSettings`] 값을 서비스에 주입합니다.
//! 테스트는 환경 변수 없이 `AuthSettings::new`로 직접 구성합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ALGORITHM="HS256"                 # HS256 | HS384 | HS512
//! export ACCESS_TOKEN_TTL_SECONDS="3600"       # 액세스 토큰 1시간
//! export REFRESH_TOKEN_TTL_DAYS="2"            # 리프레시 토큰 2일
//! export ACTION_TOKEN_MAX_AGE_SECONDS="3600"   # 이메일 인증/비밀번호 재설정 링크
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AuthSettings;
//! use crate::services::auth::TokenService;
//!
//! let settings = AuthSettings::from_env();
//! let token_service = TokenService::new(settings);
//! ```

use std::env;

use chrono::Duration;
use jsonwebtoken::Algorithm;

/// 액세스 토큰 기본 수명 (초)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;
/// 리프레시 토큰 기본 수명 (일)
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 2;
/// 액션 토큰 기본 유효 기간 (초)
pub const DEFAULT_ACTION_TOKEN_MAX_AGE_SECONDS: i64 = 3600;

/// JWT 관련 환경 변수 접근자
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본 키를 사용하며 경고 로그를 남깁니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "book-review-dev-secret".to_string()
            })
    }

    /// 서명 알고리즘을 반환합니다.
    ///
    /// 공유 비밀키 방식이므로 HMAC 계열만 허용합니다.
    /// 그 외 값은 경고 후 HS256으로 대체합니다.
    pub fn algorithm() -> Algorithm {
        let raw = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        Self::parse_algorithm(&raw)
    }

    /// 알고리즘 이름을 해석합니다. HS256/HS384/HS512 외에는 HS256을 반환합니다.
    pub fn parse_algorithm(raw: &str) -> Algorithm {
        match raw.trim().to_uppercase().as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                log::warn!("지원하지 않는 JWT_ALGORITHM '{}', HS256 사용", other);
                Algorithm::HS256
            }
        }
    }

    /// 액세스 토큰 수명 (초). 기본값: 3600
    pub fn access_token_ttl_seconds() -> i64 {
        read_positive_i64("ACCESS_TOKEN_TTL_SECONDS", DEFAULT_ACCESS_TOKEN_TTL_SECONDS)
    }

    /// 리프레시 토큰 수명 (일). 기본값: 2
    pub fn refresh_token_ttl_days() -> i64 {
        read_positive_i64("REFRESH_TOKEN_TTL_DAYS", DEFAULT_REFRESH_TOKEN_TTL_DAYS)
    }

    /// 이메일 인증/비밀번호 재설정 토큰의 최대 유효 기간 (초). 기본값: 3600
    pub fn action_token_max_age_seconds() -> i64 {
        read_positive_i64("ACTION_TOKEN_MAX_AGE_SECONDS", DEFAULT_ACTION_TOKEN_MAX_AGE_SECONDS)
    }
}

fn read_positive_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

/// 토큰 서비스에 주입되는 인증 설정 값
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub action_token_max_age: Duration,
}

impl AuthSettings {
    /// 기본 수명과 HS256을 사용하는 설정을 만듭니다.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_algorithm: Algorithm::HS256,
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
            refresh_token_ttl: Duration::days(DEFAULT_REFRESH_TOKEN_TTL_DAYS),
            action_token_max_age: Duration::seconds(DEFAULT_ACTION_TOKEN_MAX_AGE_SECONDS),
        }
    }

    /// 환경 변수에서 설정을 읽어옵니다.
    pub fn from_env() -> Self {
        Self {
            jwt_secret: JwtConfig::secret(),
            jwt_algorithm: JwtConfig::algorithm(),
            access_token_ttl: Duration::seconds(JwtConfig::access_token_ttl_seconds()),
            refresh_token_ttl: Duration::days(JwtConfig::refresh_token_ttl_days()),
            action_token_max_age: Duration::seconds(JwtConfig::action_token_max_age_seconds()),
        }
    }
}
