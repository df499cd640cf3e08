//! 메일 발송 서비스 모듈

pub mod mailer;

pub use mailer::{build_mailer, EmailMessage, HttpMailer, LogMailer, Mailer};
