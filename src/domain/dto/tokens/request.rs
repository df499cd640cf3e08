use serde::Deserialize;

/// 리프레시 토큰을 본문으로 전달할 때의 요청
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// 로그아웃 요청
///
/// 리프레시 토큰을 함께 보내면 같이 폐기됩니다.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}
