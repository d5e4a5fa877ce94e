//! 사용자 계정 서비스 모듈
//!
//! 비밀번호 로그인, 로컬 가입, 비밀번호 재설정, Google 계정 연결처럼
//! 사용자 레코드를 다루는 비즈니스 로직을 제공합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 로그인 실패 사유를 구분하지 않는 단일 에러
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::new(repo, PasswordConfig::bcrypt_cost());
//! let user = user_service.authenticate("a@b.com", "secret1").await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
