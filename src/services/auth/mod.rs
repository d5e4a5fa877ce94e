//! 인증 및 보안 서비스 모듈
//!
//! # Features
//!
//! - JWT 액세스/리프레시 토큰 발급, 검증, 갱신, 폐기
//! - Google OAuth 2.0 로그인 (state 발급/검증, 코드 교환)
//! - 가입 인증 코드와 비밀번호 재설정 코드
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명 (액세스/리프레시 키 분리)
//! - CSRF 방지 (OAuth state 1회 사용)
//! - 리프레시 토큰 jti 서버 측 저장 및 폐기
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{GoogleAuthService, TokenService};
//!
//! let tokens = token_service.generate_token_pair(user.id, access_exp, refresh_exp).await?;
//! let login_url = google_auth.login_url().await?;
//! ```

pub mod google_auth_service;
pub mod token_service;
pub mod verification_service;

pub use google_auth_service::GoogleAuthService;
pub use token_service::TokenService;
pub use verification_service::{CodePolicy, CodePurpose, VerificationService};
