//! # 인증 요청 DTO 모듈
//!
//! 클라이언트 JSON 본문과 OAuth 콜백 쿼리를 Rust 타입으로 매핑합니다.
//! 형식 검증은 `validator`로 수행하며, 실패는 400 응답으로 변환됩니다.

pub mod auth_request;

pub use auth_request::*;
