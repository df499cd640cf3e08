use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use book_review_service::caching::redis::RedisClient;
use book_review_service::config::{AuthSettings, MailConfig, ServerConfig};
use book_review_service::db::Database;
use book_review_service::repositories::books::{BookRepository, BookStore};
use book_review_service::repositories::reviews::{ReviewRepository, ReviewStore};
use book_review_service::repositories::tokens::{RevocationStore, TokenBlocklist};
use book_review_service::repositories::users::{UserRepository, UserStore};
use book_review_service::routes::configure_all_routes;
use book_review_service::services::auth::{AuthGateway, PasswordService, TokenService};
use book_review_service::services::books::BookService;
use book_review_service::services::mail::build_mailer;
use book_review_service::services::reviews::ReviewService;
use book_review_service::services::users::UserService;

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

/// 요청 핸들러에 주입되는 공유 핸들 묶음
#[derive(Clone)]
struct AppState {
    gateway: Arc<AuthGateway>,
    user_store: Arc<dyn UserStore>,
    user_service: Arc<UserService>,
    book_service: Arc<BookService>,
    review_service: Arc<ReviewService>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let (profile, env_file) = load_env_file();
    init_logging();
    report_env_file(&profile, &env_file);

    info!("📚 북 리뷰 서비스 시작중...");

    let (database, redis_client) = initialize_data_stores().await?;
    let state = build_app_state(database, redis_client).await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// 연결 핸들로부터 리포지토리와 서비스를 조립합니다.
async fn build_app_state(database: Arc<Database>, redis_client: Arc<RedisClient>) -> AppState {
    let user_repo = Arc::new(UserRepository::new(database.clone(), redis_client.clone()));
    if let Err(e) = user_repo.create_indexes().await {
        error!("users 인덱스 생성 실패: {}", e);
    }
    let user_store: Arc<dyn UserStore> = user_repo;

    let blocklist: Arc<dyn RevocationStore> = Arc::new(TokenBlocklist::new(redis_client));
    let tokens = Arc::new(TokenService::new(AuthSettings::from_env()));
    let gateway = Arc::new(AuthGateway::new(tokens, blocklist, user_store.clone()));

    let user_service = Arc::new(UserService::new(
        user_store.clone(),
        Arc::new(PasswordService::from_config()),
        gateway.clone(),
        build_mailer(MailConfig::from_env()),
        ServerConfig::public_base_url(),
    ));

    let book_repo: Arc<dyn BookStore> = Arc::new(BookRepository::new(database.clone()));
    let review_repo: Arc<dyn ReviewStore> = Arc::new(ReviewRepository::new(database));

    AppState {
        gateway,
        user_store,
        user_service,
        book_service: Arc::new(BookService::new(book_repo.clone(), review_repo.clone())),
        review_service: Arc::new(ReviewService::new(review_repo, book_repo)),
    }
}

async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
    let workers = ServerConfig::workers();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .app_data(web::Data::from(state.gateway.clone()))
            .app_data(web::Data::from(state.user_store.clone()))
            .app_data(web::Data::from(state.user_service.clone()))
            .app_data(web::Data::from(state.book_service.clone()))
            .app_data(web::Data::from(state.review_service.clone()))
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(workers)
        .run()
        .await
}

/// 프로필에 맞는 .env 파일을 읽습니다.
///
/// `RUST_LOG`도 이 파일에서 올 수 있으므로 로깅 초기화보다 먼저 호출되며,
/// 결과 기록은 `report_env_file`이 로깅 초기화 뒤에 맡습니다.
fn load_env_file() -> (String, dotenv::Result<PathBuf>) {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod"),
        "dev" => dotenv::from_filename(".env.dev"),
        _ => dotenv(),
    };

    (profile, result)
}

fn report_env_file(profile: &str, result: &dotenv::Result<PathBuf>) {
    match (profile, result) {
        (_, Ok(path)) => info!("{} 파일 로드 됨 (PROFILE={})", path.display(), profile),
        ("prod", Err(e)) => error!(".env.prod 파일 로드 실패: {}", e),
        ("dev", Err(e)) => warn!(".env.dev 파일 로드 실패: {}", e),
        (_, Err(e)) => info!("기본 .env 파일 없음: {}", e),
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis에 연결합니다. 둘 중 하나라도 실패하면 서버를 시작하지 않습니다.
///
/// Redis는 모든 인증 요청의 블록리스트 조회에 쓰이므로 연결 실패는 치명적입니다.
async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");
    let database = Database::new().await.map_err(|e| {
        error!("데이터베이스 연결 실패: {}", e);
        std::io::Error::other(format!("데이터베이스 연결 실패: {}", e))
    })?;
    info!("🗄️ 사용 데이터베이스: {}", database.database_name());

    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("Redis 연결 실패: {}", e);
        std::io::Error::other(format!("Redis 연결 실패: {}", e))
    })?;

    Ok((Arc::new(database), Arc::new(redis_client)))
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
