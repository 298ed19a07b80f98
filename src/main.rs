//! 시크릿 공유 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 세션 쿠키 기반의 웹 페이지를 제공합니다.

use std::sync::Arc;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use secrets_service::caching::redis::RedisClient;
use secrets_service::config::AppConfig;
use secrets_service::core::{configure_app, AppServices};
use secrets_service::db::Database;
use secrets_service::repositories::sessions::RedisSessionRepository;
use secrets_service::repositories::users::MongoUserRepository;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 시크릿 서비스 시작중...");

    let config = AppConfig::from_env();
    info!("실행 환경: {}", config.environment.as_str());

    // 데이터 스토어 초기화
    let services = match initialize_services(&config).await {
        Ok(services) => services,
        Err(e) => {
            error!("❌ 데이터 스토어 초기화 실패: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(&config, services).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(config: &AppConfig, services: AppServices) -> std::io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    HttpServer::new(move || {
        let services = services.clone();

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| configure_app(cfg, &services))
    })
        .bind(bind_address)?
        .workers(config.server.workers)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr 로 남깁니다
    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match result {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화하고 서비스들을 조립합니다
async fn initialize_services(config: &AppConfig) -> Result<AppServices, Box<dyn std::error::Error + Send + Sync>> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::connect(&config.database).await?;
    let user_repository = MongoUserRepository::new(&database, &config.database.users_collection);
    user_repository.create_indexes().await?;

    let redis_client = Arc::new(RedisClient::connect(&config.redis.url).await?);
    let session_repository = RedisSessionRepository::new(redis_client);

    log_enabled_providers(config);

    Ok(AppServices::new(
        config,
        Arc::new(user_repository),
        Arc::new(session_repository),
    ))
}

fn log_enabled_providers(config: &AppConfig) {
    let google = if config.oauth.google.is_some() { "활성" } else { "비활성" };
    let facebook = if config.oauth.facebook.is_some() { "활성" } else { "비활성" };
    info!("🔐 OAuth 프로바이더 - Google: {}, Facebook: {}", google, facebook);
}
