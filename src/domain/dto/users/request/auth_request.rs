//! 인증 요청관련 DTO
//!
//! 로그인, 비밀번호 재설정 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 5, message = "비밀번호는 최소 5자 이상이어야 합니다"))]
    pub new_password: String,

    pub confirm_new_password: String,
}

fn validate_passwords_match(req: &PasswordResetConfirmRequest) -> Result<(), ValidationError> {
    if req.new_password != req.confirm_new_password {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않습니다".into()));
    }
    Ok(())
}
