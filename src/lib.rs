//! DWELL 인증 서비스
//!
//! 쿠키 기반 JWT 세션과 리프레시 토큰, Google OAuth 2.0 로그인,
//! 메일로 보내는 가입 인증/비밀번호 재설정 코드를 제공합니다.
//!
//! # Features
//!
//! - **JWT 세션**: 액세스 토큰(15분)과 리프레시 토큰(7일)을 쿠키로 전달
//! - **리프레시 jti**: Redis에 저장하여 로그아웃/회전 시 즉시 폐기
//! - **OAuth 2.0**: Google 로그인, 1회용 state
//! - **인증 코드**: 6자리 코드, 재발급 제한
//! - **MongoDB**: 사용자 레코드 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 쿠키 설정
//! └─────────────────┘
//!          │  web::Data<AuthContext>
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰, OAuth, 코드, 사용자
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Repositories /  │ ← MongoDB 사용자, Redis 임시 저장소
//! │ EphemeralStore  │
//! └─────────────────┘
//! ```
//!
//! Redis 연결에 실패하면 축소 모드로 구동됩니다. 액세스 토큰 로그인만 가능하고
//! 리프레시, 인증 코드, Google 로그인은 503으로 응답합니다.

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
