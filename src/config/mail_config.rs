//! 메일 발송 설정
//!
//! Brevo 호환 트랜잭션 메일 API 설정을 읽습니다.
//! `MAIL_API_KEY`가 없으면 [`MailConfig::from_env`]는 `None`을 반환하고,
//! 애플리케이션은 메일을 로그로만 남기는 발송기를 사용합니다.

use std::env;

const DEFAULT_MAIL_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_email: String,
    pub from_name: String,
}

impl MailConfig {
    /// 환경 변수에서 메일 설정을 읽습니다.
    ///
    /// # Returns
    ///
    /// * `Some(MailConfig)` - `MAIL_API_KEY`가 비어 있지 않은 경우
    /// * `None` - 메일 API가 설정되지 않은 경우
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("MAIL_API_KEY").ok().filter(|key| !key.trim().is_empty())?;

        Some(Self {
            api_url: env::var("MAIL_API_URL").unwrap_or_else(|_| DEFAULT_MAIL_API_URL.to_string()),
            api_key,
            from_email: env::var("MAIL_FROM").unwrap_or_else(|_| "no-reply@localhost".to_string()),
            from_name: env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "Book Reviews".to_string()),
        })
    }
}
