pub mod create_user;
pub mod auth_request;
pub mod role_request;

pub use create_user::CreateUserRequest;
pub use auth_request::{LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest};
pub use role_request::UpdateRoleRequest;
