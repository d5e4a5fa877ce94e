//! DWELL 인증 서비스 메인 애플리케이션
//!
//! 설정을 읽고 MongoDB, Redis, 메일/로그 서비스 클라이언트를 만든 뒤
//! [`AuthContext`]로 조립하여 Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use dwell_auth_service::caching::redis::RedisStore;
use dwell_auth_service::caching::EphemeralStore;
use dwell_auth_service::config::{
    GoogleOAuthConfig, JwtConfig, PasswordConfig, ServerConfig, ServiceEndpoints, SessionConfig,
};
use dwell_auth_service::core::{AuthContext, ContextConfig, SessionSettings};
use dwell_auth_service::db::Database;
use dwell_auth_service::errors::errors::AppResult;
use dwell_auth_service::repositories::users::MongoUserRepository;
use dwell_auth_service::routes::configure_all_routes;
use dwell_auth_service::services::audit::audit_dispatcher::DEFAULT_QUEUE_CAPACITY;
use dwell_auth_service::services::audit::HttpAuditSink;
use dwell_auth_service::services::mail::HttpMailTransport;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 DWELL 인증 서비스 시작중...");

    let context = match build_context().await {
        Ok(context) => web::Data::new(context),
        Err(e) => {
            error!("서비스 초기화 실패: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(context).await
}

/// 연결 핸들과 서비스를 만들어 컨텍스트로 조립합니다.
///
/// MongoDB 연결 실패는 시작 실패이고, Redis 연결 실패는 축소 모드입니다.
async fn build_context() -> AppResult<AuthContext> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::connect().await?);
    let repo = MongoUserRepository::new(database);
    repo.create_indexes().await?;

    let store: Option<Arc<dyn EphemeralStore>> =
        match RedisStore::connect(&ServiceEndpoints::redis_url()).await {
            Ok(store) => Some(Arc::new(store) as Arc<dyn EphemeralStore>),
            Err(e) => {
                warn!("Redis 연결 실패, 축소 모드로 구동합니다: {}", e);
                None
            }
        };

    let config = ContextConfig {
        access_secret: JwtConfig::access_secret(),
        refresh_secret: JwtConfig::refresh_secret(),
        refresh_policy: JwtConfig::refresh_policy(),
        bcrypt_cost: PasswordConfig::bcrypt_cost(),
        google: GoogleOAuthConfig::settings(),
        session: SessionSettings {
            access_ttl: JwtConfig::access_ttl(),
            refresh_ttl: JwtConfig::refresh_ttl(),
            redirect_url: SessionConfig::redirect_url(),
            cookie_secure: SessionConfig::cookie_secure(),
        },
    };

    info!("🔁 리프레시 정책: {}", config.refresh_policy.as_str());

    AuthContext::with_audit_sink(
        config,
        store,
        Arc::new(repo),
        Arc::new(HttpMailTransport::new(ServiceEndpoints::mailer_url())?),
        Arc::new(HttpAuditSink::new(ServiceEndpoints::logger_url())?),
        DEFAULT_QUEUE_CAPACITY,
    )
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, 접근 로그, 경로 정규화 미들웨어를 적용합니다.
async fn start_http_server(context: web::Data<AuthContext>) -> std::io::Result<()> {
    let bind_address = (ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", bind_address.0, bind_address.1);
    info!("📍 Health check: http://{}:{}/ping", bind_address.0, bind_address.1);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("invalid rate limit configuration"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(context.clone())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr로만 남깁니다.
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    if let Err(e) = loaded {
        eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info,actix_web=info"))
        .format_timestamp_millis()
        .init();
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 10)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 30)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "10".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 10 사용", e);
            10
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "30".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 30 사용", e);
            30
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
