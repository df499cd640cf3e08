//! 라우트 구성 모듈
//!
//! 스코프별로 핸들러와 인증 미들웨어를 묶어 등록합니다.
//!
//! ```text
//! /health             공개
//! /api/v1/auth        공개 (/me 만 인증 필요)
//! /api/v1/books       user | admin
//! /api/v1/reviews     user | admin
//! /api/v1/users       admin
//! ```

use actix_web::web;
use serde_json::json;

use crate::domain::entities::users::UserRole;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_book_routes(cfg);
    configure_review_routes(cfg);
    configure_user_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::signup)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout)
            .service(handlers::auth::me)
            .service(handlers::auth::verify_email)
            .service(handlers::auth::password_reset_request)
            .service(handlers::auth::password_reset_confirm)
    );
}

fn configure_book_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/books")
            .wrap(AuthMiddleware::required_with_roles(vec![UserRole::User, UserRole::Admin]))
            .service(handlers::books::list_books)
            .service(handlers::books::list_user_books)
            .service(handlers::books::create_book)
            .service(handlers::books::get_book)
            .service(handlers::books::update_book)
            .service(handlers::books::delete_book)
    );
}

fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reviews")
            .wrap(AuthMiddleware::required_with_roles(vec![UserRole::User, UserRole::Admin]))
            .service(handlers::reviews::add_review)
            .service(handlers::reviews::list_book_reviews)
            .service(handlers::reviews::delete_review)
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(AuthMiddleware::admin_only())
            .service(handlers::users::get_user)
            .service(handlers::users::update_role)
            .service(handlers::users::delete_user)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "book_review_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
