//! # User Data Transfer Objects Module
//!
//! 인증 API의 요청/응답 데이터 구조입니다.
//!
//! ## 엔드포인트별 DTO
//!
//! | 엔드포인트 | 요청 | 응답 데이터 |
//! |------------|------|-------------|
//! | `POST /authenticate` | `LoginRequest` | `UserSummary` |
//! | `POST /register` | `RegisterRequest` | `CreatedUserResponse` |
//! | `POST /verify-code` | `EmailRequest` | 없음 |
//! | `POST /forgot-password` | `EmailRequest` | 없음 |
//! | `POST /reset-password` | `ResetPasswordRequest` | 없음 |
//! | `GET /resource/profile` | 쿠키 | `UserSummary` |
//! | `GET /oauth/google/callback` | `OAuthCallbackQuery` | 302 리다이렉트 |
//!
//! ## 검증
//!
//! 요청 DTO는 `validator::Validate`를 구현하며, 핸들러는 비즈니스 로직 전에
//! `request.validate()?`를 호출합니다. 실패는 `AppError::ValidationError` (400)로 변환됩니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
