use serde::Serialize;

use crate::domain::models::token::RefreshedAccess;

/// 리프레시 응답
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<RefreshedAccess> for AccessTokenResponse {
    fn from(refreshed: RefreshedAccess) -> Self {
        Self {
            access_token: refreshed.access_token,
            token_type: "Bearer".to_string(),
            expires_in: refreshed.expires_in,
        }
    }
}

/// 본문 데이터 없이 결과 메시지만 돌려주는 응답
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
