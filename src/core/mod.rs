//! # Core Module
//!
//! 애플리케이션 조립 지점입니다.
//!
//! ### [`context`] - 요청 처리 컨텍스트
//! - **AuthContext**: `main`에서 한 번 만들어 `web::Data`로 모든 핸들러에 공유
//! - **SessionSettings**: 토큰 수명, 쿠키 보안 속성, 로그인 후 리다이렉트 주소
//!
//! 전역 싱글톤은 없습니다. 연결 핸들과 서비스는 모두 생성자로 주입됩니다.

pub mod context;

pub use context::{AuthContext, ContextConfig, SessionSettings};
