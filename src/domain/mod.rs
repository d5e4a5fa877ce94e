//! 도메인 계층
//!
//! - [`entities`] - 영속 엔티티 (사용자)
//! - [`models`] - 토큰 클레임, OAuth 사용자 정보 등 저장되지 않는 모델
//! - [`dto`] - HTTP 요청/응답 본문

pub mod entities;
pub mod dto;
pub mod models;
