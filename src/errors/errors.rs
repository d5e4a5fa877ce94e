//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 서비스의 모든 실패 유형을 하나의 `AppError`로 통합합니다.
//! `thiserror`로 메시지를 정의하고 `actix_web::ResponseError`로 HTTP 응답에 매핑합니다.
//!
//! ## 메시지 정책
//!
//! - 자격 증명/코드 실패는 사용자 존재 여부를 노출하지 않는 일반 메시지로 응답합니다.
//! - 저장소/인프라 에러는 5xx + 일반 메시지로 응답하고, 상세 내용은 서버 로그에만 남깁니다.
//! - OAuth state/code 실패는 항상 거부(fail closed)합니다.
//!
//! ```rust,ignore
//! use crate::errors::errors::{AppError, AppResult};
//!
//! async fn find(repo: &dyn UserRepository, id: i64) -> AppResult<User> {
//!     repo.get_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("user not found".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::dto::JsonResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 이메일/비밀번호 불일치 (401)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// 중복 리소스 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 코드 불일치 (400)
    #[error("invalid verification code")]
    InvalidCodeError,

    /// 비밀번호 재설정 코드 만료 또는 미발급 (400)
    #[error("reset code expired or missing")]
    ExpiredError,

    /// 이전 코드가 아직 유효하여 재발급 거부 (429)
    #[error("code already issued, retry after it expires")]
    RateLimitError,

    /// 서명/형식/만료 검증 실패 (401)
    #[error("Invalid token: {0}")]
    InvalidTokenError(String),

    /// jti가 저장소에 없음: 사용됨, 회전됨, 또는 폐기됨 (401)
    #[error("refresh token revoked")]
    RevokedError,

    /// 저장소 없이 구동 중이라 지원하지 않는 작업 (503)
    #[error("Unsupported: {0}")]
    UnsupportedError(String),

    /// 임시 저장소(Redis) 에러 또는 타임아웃 (500)
    #[error("Store error: {0}")]
    StoreError(String),

    /// 토큰 서명 실패 (500)
    #[error("Signing error: {0}")]
    SigningError(String),

    /// OAuth 코드 교환 또는 사용자 정보 조회 실패 (502)
    #[error("OAuth exchange error: {0}")]
    ExchangeError(String),

    /// OAuth state 검증 실패 (400)
    #[error("invalid oauth state")]
    InvalidStateError,

    /// 메일 전송 거부 (502)
    #[error("Delivery error: {0}")]
    DeliveryError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 정보 없음 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 사용자 저장소 에러 또는 타임아웃 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// OS 난수 생성 실패 (500)
    #[error("Random generation error: {0}")]
    RandomGenerationError(String),

    /// 기타 내부 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 노출되는 메시지
    ///
    /// 인프라 계열 에러는 상세 내용을 숨기고 일반 메시지만 반환합니다.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "invalid credentials".to_string(),
            AppError::ConflictError(msg) => msg.clone(),
            AppError::InvalidCodeError => "invalid verification code".to_string(),
            AppError::ExpiredError => "invalid or expired reset code".to_string(),
            AppError::RateLimitError => "too many requests, please try again later".to_string(),
            AppError::InvalidTokenError(_) | AppError::RevokedError => "invalid token".to_string(),
            AppError::AuthenticationError(msg) => msg.clone(),
            AppError::InvalidStateError => "invalid state".to_string(),
            AppError::ExchangeError(_) => "failed to get user from provider".to_string(),
            AppError::DeliveryError(_) => "failed to send code".to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::UnsupportedError(_) => "service temporarily unavailable".to_string(),
            AppError::StoreError(_)
            | AppError::SigningError(_)
            | AppError::DatabaseError(_)
            | AppError::RandomGenerationError(_)
            | AppError::InternalError(_) => "internal server error".to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::InvalidTokenError(_)
            | AppError::RevokedError
            | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::InvalidCodeError
            | AppError::ExpiredError
            | AppError::InvalidStateError
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimitError => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ExchangeError(_) | AppError::DeliveryError(_) => StatusCode::BAD_GATEWAY,
            AppError::UnsupportedError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::StoreError(_)
            | AppError::SigningError(_)
            | AppError::DatabaseError(_)
            | AppError::RandomGenerationError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 상세 원인을 `error!`로 기록한 뒤 일반 메시지로 응답합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("요청 거부: {}", self);
        }

        HttpResponse::build(status).json(JsonResponse::<()>::error(self.client_message()))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::StoreError(e.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("password hashing failed: {}", e))
    }
}
