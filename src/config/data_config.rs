//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 비밀번호 해싱, 서버 바인딩, 협력 서비스 주소를 관리합니다.

use std::env;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수로 현재 환경을 판별합니다. 기본값은 운영 환경입니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4~15 범위의 값이면 그대로 사용하고,
    /// 아니면 실행 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|cost| cost.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 포트 번호. 기본값: 80
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(80)
    }

    /// 호스트 주소. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// 협력 서비스 주소
///
/// 메일 발송과 감사 로그 수집은 별도 서비스가 담당합니다.
pub struct ServiceEndpoints;

impl ServiceEndpoints {
    /// 메일 서비스 발송 엔드포인트 (`MAILER_URL`)
    pub fn mailer_url() -> String {
        env::var("MAILER_URL").unwrap_or_else(|_| "http://mailer-service/send".to_string())
    }

    /// 로그 수집 서비스 엔드포인트 (`LOGGER_URL`)
    pub fn logger_url() -> String {
        env::var("LOGGER_URL").unwrap_or_else(|_| "http://logger-service/log".to_string())
    }

    /// 세션 저장소 주소 (`REDIS_URL`)
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}
