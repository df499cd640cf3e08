//! # Configuration Module
//!
//! 서비스 설정을 환경 변수 기반으로 중앙에서 관리하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 패스워드 해싱 설정
//! - [`auth_config`] - JWT 서명 및 토큰 수명 설정
//! - [`mail_config`] - 트랜잭션 메일 API 설정
//!
//! ## 환경 분리
//!
//! `PROFILE` 값에 따라 `.env.dev` / `.env.prod` 파일이 로드되고,
//! `ENVIRONMENT` 값은 bcrypt cost 같은 환경별 기본값을 결정합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthSettings, Environment, ServerConfig};
//!
//! let env = Environment::current();
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let auth = AuthSettings::from_env();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export APP_BASE_URL="https://books.example.com"
//!
//! export JWT_SECRET="your-super-secret-key"
//! export ACCESS_TOKEN_TTL_SECONDS="3600"
//!
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//!
//! export MAIL_API_KEY="xkeysib-..."
//! export MAIL_FROM="no-reply@books.example.com"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod mail_config;

pub use data_config::*;
pub use auth_config::*;
pub use mail_config::*;
