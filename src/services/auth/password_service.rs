//! 비밀번호 해싱 서비스
//!
//! bcrypt로 비밀번호를 해싱하고 검증합니다. cost는 환경별로 다르게 설정됩니다.

use crate::config::PasswordConfig;
use crate::errors::errors::{AppResult, ErrorContext};

/// bcrypt 기반 비밀번호 해셔
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// `BCRYPT_COST` 또는 환경별 기본 cost를 사용합니다.
    pub fn from_config() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    /// 평문 비밀번호를 해싱합니다.
    pub fn hash(&self, password: &str) -> AppResult<String> {
        let hash_start = std::time::Instant::now();
        let password_hash = bcrypt::hash(password, self.cost).context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }

    /// 비밀번호가 해시와 일치하는지 확인합니다.
    ///
    /// 저장된 해시가 손상된 경우에도 `false`를 반환합니다.
    pub fn verify(&self, password: &str, password_hash: &str) -> bool {
        match bcrypt::verify(password, password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                log::error!("비밀번호 해시 검증 실패: {}", e);
                false
            }
        }
    }
}
