use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::caching::redis::RedisClient;
use crate::errors::errors::AppError;

/// 폐기 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    /// 사용자 로그아웃으로 폐기된 세션 토큰
    Logout,
    /// 한 번 사용된 이메일 인증/비밀번호 재설정 토큰
    ActionConsumed,
}

/// 블록리스트 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlocklistEntry {
    pub jti: String,
    pub reason: RevocationReason,
    pub revoked_at: i64,
}

/// 토큰 폐기 레지스트리 인터페이스
///
/// 항목은 `ttl_seconds`가 지나면 저장소에서 스스로 사라집니다.
/// 저장소에 접근할 수 없으면 `RevocationStoreUnavailable`을 반환하며,
/// 호출 측은 이를 "폐기되지 않음"으로 해석해서는 안 됩니다.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// `jti`를 `ttl_seconds` 동안 폐기 상태로 기록합니다. 같은 `jti`를 다시 기록해도 안전합니다.
    async fn revoke(&self, jti: &str, ttl_seconds: u64, reason: RevocationReason) -> Result<(), AppError>;

    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError>;

    /// `jti`가 아직 기록되지 않았을 때만 원자적으로 기록합니다.
    ///
    /// 이번 호출이 기록했으면 `true`, 이미 기록되어 있었으면 `false`입니다.
    async fn claim(&self, jti: &str, ttl_seconds: u64, reason: RevocationReason) -> Result<bool, AppError>;
}

/// Redis 기반 블록리스트
///
/// 키 형식은 `blocklist:{jti}`이며 `SET ... EX`로 기록합니다. 선점은 `SET ... NX EX`입니다.
pub struct TokenBlocklist {
    redis: Arc<RedisClient>,
}

impl TokenBlocklist {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    fn key(jti: &str) -> String {
        format!("blocklist:{}", jti)
    }
}

#[async_trait]
impl RevocationStore for TokenBlocklist {
    async fn revoke(&self, jti: &str, ttl_seconds: u64, reason: RevocationReason) -> Result<(), AppError> {
        let ttl_seconds = ttl_seconds.max(1);
        let entry = BlocklistEntry {
            jti: jti.to_string(),
            reason,
            revoked_at: Utc::now().timestamp(),
        };

        self.redis
            .set_with_expiry(&Self::key(jti), &entry, ttl_seconds)
            .await
            .map_err(|e| {
                log::error!("블록리스트 기록 실패 - JTI: {}, 에러: {}", jti, e);
                AppError::RevocationStoreUnavailable(e.to_string())
            })?;

        log::info!("토큰 폐기됨 - JTI: {}, 사유: {:?}, TTL: {}초", jti, reason, ttl_seconds);
        Ok(())
    }

    async fn claim(&self, jti: &str, ttl_seconds: u64, reason: RevocationReason) -> Result<bool, AppError> {
        let ttl_seconds = ttl_seconds.max(1);
        let entry = BlocklistEntry {
            jti: jti.to_string(),
            reason,
            revoked_at: Utc::now().timestamp(),
        };

        let claimed = self.redis
            .set_if_absent_with_expiry(&Self::key(jti), &entry, ttl_seconds)
            .await
            .map_err(|e| {
                log::error!("블록리스트 선점 실패 - JTI: {}, 에러: {}", jti, e);
                AppError::RevocationStoreUnavailable(e.to_string())
            })?;

        if claimed {
            log::info!("토큰 선점됨 - JTI: {}, 사유: {:?}, TTL: {}초", jti, reason, ttl_seconds);
        }
        Ok(claimed)
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        self.redis
            .exists(&Self::key(jti))
            .await
            .map_err(|e| {
                log::error!("블록리스트 조회 실패 - JTI: {}, 에러: {}", jti, e);
                AppError::RevocationStoreUnavailable(e.to_string())
            })
    }
}
