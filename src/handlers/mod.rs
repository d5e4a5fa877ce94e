//! HTTP 요청 핸들러 모듈
//!
//! - [`auth`] - 로그인, 가입, 코드 발송, 비밀번호 재설정, 프로필, 로그아웃, Google OAuth
//! - [`cookies`] - 세션 쿠키 생성과 만료

pub mod auth;
pub mod cookies;
