//! 관리자용 역할 변경 요청 DTO

use serde::Deserialize;

use crate::domain::entities::users::UserRole;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}
