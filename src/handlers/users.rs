//! # User Management HTTP Handlers
//!
//! 관리자 전용 사용자 관리 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/users/{id}` | 사용자 조회 | 200 OK |
//! | `PATCH` | `/users/{id}/role` | 역할 변경 | 200 OK |
//! | `DELETE` | `/users/{id}` | 사용자 삭제 | 204 No Content |

use actix_web::{delete, get, patch, web, HttpResponse};

use crate::domain::dto::users::UpdateRoleRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::users::UserService;

#[get("/{user_uid}")]
pub async fn get_user(
    users: web::Data<UserService>,
    user_uid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(users.get_user(&user_uid).await?))
}

#[patch("/{user_uid}/role")]
pub async fn update_role(
    admin: AuthenticatedUser,
    users: web::Data<UserService>,
    user_uid: web::Path<String>,
    payload: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("역할 변경 요청 - 관리자: {}, 대상: {}", admin.email, user_uid);

    let user = users.update_role(&user_uid, payload.role).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{user_uid}")]
pub async fn delete_user(
    admin: AuthenticatedUser,
    users: web::Data<UserService>,
    user_uid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("사용자 삭제 요청 - 관리자: {}, 대상: {}", admin.email, user_uid);

    users.delete_user(&user_uid).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};

    use super::*;
    use crate::domain::entities::users::UserRole;
    use crate::middlewares::AuthMiddleware;
    use crate::services::auth::AuthGateway;
    use crate::test_support::{AuthFixture, RecordingMailer};

    #[actix_web::test]
    async fn test_admin_manages_users() {
        let fixture = AuthFixture::new();
        let service = web::Data::new(UserService::new(
            fixture.users.clone(),
            AuthFixture::passwords(),
            fixture.gateway.clone(),
            Arc::new(RecordingMailer::default()),
            "http://books.test",
        ));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::<AuthGateway>::from(fixture.gateway.clone()))
                .app_data(service)
                .service(
                    web::scope("/api/v1/users")
                        .wrap(AuthMiddleware::admin_only())
                        .service(get_user)
                        .service(update_role)
                        .service(delete_user),
                ),
        )
        .await;

        let admin = fixture.users.insert_with_role("admin@example.com", UserRole::Admin);
        let auth = format!("Bearer {}", fixture.gateway.issue_session_pair(&admin).unwrap().access_token);
        let target = fixture.users.insert_with_role("reader@example.com", UserRole::User);
        let target_uid = target.id_string().unwrap();

        let request = test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{}/role", target_uid))
            .insert_header(("Authorization", auth.clone()))
            .set_json(serde_json::json!({ "role": "admin" }))
            .to_request();
        let promoted: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(promoted["role"], "admin");
        assert_eq!(fixture.users.get(&target.id.unwrap()).map(|u| u.role), Some(UserRole::Admin));

        let request = test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{}", target_uid))
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NO_CONTENT);

        let request = test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", target_uid))
            .insert_header(("Authorization", auth))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);
    }
}
