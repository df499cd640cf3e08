//! 메일 발송기
//!
//! [`Mailer`] 트레이트 뒤에 실제 HTTP 발송기와 로그 전용 발송기를 둡니다.
//! 메일 발송 실패는 호출 측에서 로그로 남기고 요청 자체는 실패시키지 않습니다.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfig;
use crate::errors::errors::AppError;

/// 보낼 메일 한 통
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), AppError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody {
    sender: MailAddress,
    to: Vec<MailAddress>,
    subject: String,
    html_content: String,
}

/// Brevo 호환 트랜잭션 메일 API 발송기
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn body(&self, message: EmailMessage) -> SendEmailBody {
        SendEmailBody {
            sender: MailAddress {
                email: self.config.from_email.clone(),
                name: Some(self.config.from_name.clone()),
            },
            to: vec![MailAddress { email: message.to, name: None }],
            subject: message.subject,
            html_content: message.html_body,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), AppError> {
        let to = message.to.clone();

        let response = self.client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(&self.body(message))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 API 요청 실패: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            log::info!("메일 발송 완료 - 수신자: {}", to);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalServiceError(format!(
            "메일 발송 실패 (status={}): {}", status, body
        )))
    }
}

/// 메일 API가 설정되지 않은 개발 환경용 발송기. 메일 내용을 로그로만 남깁니다.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), AppError> {
        log::info!(
            "[메일 미발송] 수신자: {}, 제목: {}\n{}",
            message.to, message.subject, message.html_body
        );
        Ok(())
    }
}

/// 설정 유무에 따라 발송기를 선택합니다.
pub fn build_mailer(config: Option<MailConfig>) -> Arc<dyn Mailer> {
    match config {
        Some(config) => {
            log::info!("메일 발송기: HTTP API ({})", config.api_url);
            Arc::new(HttpMailer::new(config))
        }
        None => {
            log::warn!("MAIL_API_KEY가 설정되지 않아 메일을 로그로만 남깁니다");
            Arc::new(LogMailer)
        }
    }
}
