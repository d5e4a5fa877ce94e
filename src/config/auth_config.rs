//! # Authentication Configuration Module
//!
//! JWT 서명 키와 토큰 수명, 리프레시 토큰 회전 정책, Google OAuth 클라이언트,
//! 세션 쿠키와 로그인 후 리다이렉트 주소를 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! # JWT (액세스/리프레시 토큰은 서로 다른 키로 서명)
//! export ACCESS_SECRET="..."
//! export REFRESH_SECRET="..."
//! export ACCESS_TOKEN_TTL_MINUTES="15"
//! export REFRESH_TOKEN_TTL_DAYS="7"
//! export REFRESH_ROTATION="rotate"      # rotate | reuse
//!
//! # Google OAuth
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URL="http://localhost/oauth/google/callback"
//!
//! # 세션
//! export REDIRECT_URL="http://localhost:3000"
//! export COOKIE_SECURE="false"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{GoogleOAuthConfig, JwtConfig};
//!
//! let settings = GoogleOAuthConfig::settings();
//! let access_ttl = JwtConfig::access_ttl();
//! ```

use std::env;
use std::time::Duration;

fn env_or_warn(name: &str, fallback: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        log::warn!("{} not set, using default (not secure for production!)", name);
        fallback.to_string()
    })
}

/// Google OAuth 클라이언트 설정 값
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// - `client_secret`은 로그에 출력하지 마세요
/// - 프로덕션에서는 HTTPS redirect URI만 사용하세요
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> String {
        env_or_warn("GOOGLE_CLIENT_ID", "")
    }

    pub fn client_secret() -> String {
        env_or_warn("GOOGLE_CLIENT_SECRET", "")
    }

    /// Google 콘솔에 등록한 콜백 주소 (`GOOGLE_REDIRECT_URL`)
    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URL")
            .unwrap_or_else(|_| "http://localhost/oauth/google/callback".to_string())
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// OpenID Connect userinfo 엔드포인트
    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://openidconnect.googleapis.com/v1/userinfo".to_string())
    }

    /// 모든 설정 값을 한 번에 읽어 옵니다.
    pub fn settings() -> GoogleOAuthSettings {
        GoogleOAuthSettings {
            client_id: Self::client_id(),
            client_secret: Self::client_secret(),
            redirect_uri: Self::redirect_uri(),
            auth_uri: Self::auth_uri(),
            token_uri: Self::token_uri(),
            userinfo_uri: Self::userinfo_uri(),
        }
    }
}

/// 리프레시 성공 시 jti 처리 정책
///
/// - `Rotate`: 기존 jti를 삭제하고 같은 만료 시각의 새 리프레시 토큰을 발급합니다.
///   동시에 들어온 두 요청 중 `DEL`에 성공한 한 요청만 통과합니다.
/// - `Reuse`: jti를 유지하고 액세스 토큰만 새로 발급합니다.
///   리프레시 토큰은 만료되거나 로그아웃될 때까지 반복 사용할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    #[default]
    Rotate,
    Reuse,
}

impl RefreshPolicy {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "rotate" => Ok(RefreshPolicy::Rotate),
            "reuse" => Ok(RefreshPolicy::Reuse),
            _ => Err(format!("Unsupported refresh policy: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshPolicy::Rotate => "rotate",
            RefreshPolicy::Reuse => "reuse",
        }
    }
}

/// JWT 설정
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 HS256 키로 서명합니다.
/// 한 쪽 키가 유출되어도 다른 종류의 토큰을 위조할 수 없습니다.
pub struct JwtConfig;

impl JwtConfig {
    pub fn access_secret() -> String {
        env_or_warn("ACCESS_SECRET", "dev-access-secret")
    }

    pub fn refresh_secret() -> String {
        env_or_warn("REFRESH_SECRET", "dev-refresh-secret")
    }

    /// 액세스 토큰 수명. 기본값: 15분
    pub fn access_ttl() -> Duration {
        let minutes = env::var("ACCESS_TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(15);
        Duration::from_secs(minutes * 60)
    }

    /// 리프레시 토큰 수명. 기본값: 7일
    pub fn refresh_ttl() -> Duration {
        let days = env::var("REFRESH_TOKEN_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(7);
        Duration::from_secs(days * 24 * 60 * 60)
    }

    /// `REFRESH_ROTATION` 값. 잘못된 값이면 경고 후 회전 정책을 사용합니다.
    pub fn refresh_policy() -> RefreshPolicy {
        match env::var("REFRESH_ROTATION") {
            Ok(value) => RefreshPolicy::from_str(&value).unwrap_or_else(|e| {
                log::warn!("{}, falling back to rotate", e);
                RefreshPolicy::Rotate
            }),
            Err(_) => RefreshPolicy::Rotate,
        }
    }
}

/// 세션 쿠키와 리다이렉트 설정
pub struct SessionConfig;

impl SessionConfig {
    /// OAuth 로그인 완료 후 이동할 앱 주소 (`REDIRECT_URL`)
    pub fn redirect_url() -> String {
        env::var("REDIRECT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }

    /// 쿠키 `Secure` 속성 (`COOKIE_SECURE`). 기본값: false
    pub fn cookie_secure() -> bool {
        env::var("COOKIE_SECURE")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}
