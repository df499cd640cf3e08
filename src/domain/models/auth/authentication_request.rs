use crate::domain::entities::users::UserRole;

/// 라우트가 요구하는 역할
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredRole {
    /// 특정 단일 역할이 필요
    Single(UserRole),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<UserRole>),
}

impl RequiredRole {
    /// 허용 역할 목록
    pub fn allowed(&self) -> &[UserRole] {
        match self {
            RequiredRole::Single(role) => std::slice::from_ref(role),
            RequiredRole::Any(roles) => roles,
        }
    }

    /// 사용자 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, role: UserRole) -> bool {
        self.allowed().contains(&role)
    }
}
