//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 [`crate::core::context::AuthContext`]로 묶인 뒤
//! 핸들러에 주입됩니다.
//!
//! - [`users`] - 사용자 계정 (로그인, 가입, 비밀번호 재설정, Google 연결)
//! - [`auth`] - 토큰, Google OAuth, 인증 코드
//! - [`mail`] - 메일 서비스 전송
//! - [`audit`] - 로그 수집기로 보내는 감사 이벤트

pub mod audit;
pub mod auth;
pub mod mail;
pub mod users;
